use std::fs;

use crate::{
    error::{IOError, Result, XmlError, XmlErrorKind},
    formatter::{FormatConfig, XmlFormatter},
    tree::Element,
};

pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            XmlError::new(XmlErrorKind::IO(IOError::FileNotFound(path.to_string())))
        }
        std::io::ErrorKind::PermissionDenied => XmlError::new(XmlErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => XmlError::new(XmlErrorKind::IO(IOError::ReadError(e.to_string()))),
    })
}

pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => XmlError::new(XmlErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => XmlError::new(XmlErrorKind::IO(IOError::WriteError(e.to_string()))),
    })
}

pub fn format_xml(element: &Element) -> Result<String> {
    XmlFormatter::format(element, &FormatConfig::default())
}

pub fn format_xml_multiline(element: &Element) -> Result<String> {
    XmlFormatter::format(
        element,
        &FormatConfig {
            multiline: true,
            strict: false,
        },
    )
}
