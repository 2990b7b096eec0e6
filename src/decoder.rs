use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbologies the camera decoder can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeFormat {
    #[serde(rename = "qr")]
    Qr,
    #[serde(rename = "pdf417")]
    Pdf417,
    #[serde(rename = "ean13")]
    Ean13,
    #[serde(rename = "ean8")]
    Ean8,
    #[serde(rename = "upc_a")]
    UpcA,
    #[serde(rename = "upc_e")]
    UpcE,
    #[serde(rename = "aztec")]
    Aztec,
    #[serde(rename = "codabar")]
    Codabar,
    #[serde(rename = "code39")]
    Code39,
    #[serde(rename = "code93")]
    Code93,
    #[serde(rename = "code128")]
    Code128,
    #[serde(rename = "datamatrix")]
    DataMatrix,
    #[serde(rename = "itf14")]
    Itf14,
}

impl CodeFormat {
    pub const ALL: [CodeFormat; 13] = [
        CodeFormat::Qr,
        CodeFormat::Pdf417,
        CodeFormat::Ean13,
        CodeFormat::Ean8,
        CodeFormat::UpcA,
        CodeFormat::UpcE,
        CodeFormat::Aztec,
        CodeFormat::Codabar,
        CodeFormat::Code39,
        CodeFormat::Code93,
        CodeFormat::Code128,
        CodeFormat::DataMatrix,
        CodeFormat::Itf14,
    ];

    /// Identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::Qr => "qr",
            CodeFormat::Pdf417 => "pdf417",
            CodeFormat::Ean13 => "ean13",
            CodeFormat::Ean8 => "ean8",
            CodeFormat::UpcA => "upc_a",
            CodeFormat::UpcE => "upc_e",
            CodeFormat::Aztec => "aztec",
            CodeFormat::Codabar => "codabar",
            CodeFormat::Code39 => "code39",
            CodeFormat::Code93 => "code93",
            CodeFormat::Code128 => "code128",
            CodeFormat::DataMatrix => "datamatrix",
            CodeFormat::Itf14 => "itf14",
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        CodeFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| format!("Unknown code format '{}'", s))
    }
}

/// One decode delivered by the camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCode {
    pub format: CodeFormat,
    pub payload: String,
}

impl DecodedCode {
    pub fn new<S: Into<String>>(format: CodeFormat, payload: S) -> Self {
        Self {
            format,
            payload: payload.into(),
        }
    }

    pub fn qr<S: Into<String>>(payload: S) -> Self {
        Self::new(CodeFormat::Qr, payload)
    }
}
