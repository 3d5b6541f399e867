//! [`OcrEngine`] implementation that shells out to the `tesseract` CLI.
//!
//! The captured image is written to a temporary PNG and tesseract prints its
//! result to stdout: plain text for region mode, TSV for word mode.

use std::io::Write;
use std::process::Command;

use image::RgbaImage;

use super::{OcrEngine, OcrError, Token};
use crate::config::OcrConfig;

/// TSV row level for a single word.
const WORD_LEVEL: i32 = 5;

/// Runs the tesseract executable.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    cmd: String,
    region_psm: u32,
    word_psm: u32,
}

impl TesseractEngine {
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            cmd: config.tesseract_cmd.clone(),
            region_psm: config.region_psm,
            word_psm: config.word_psm,
        }
    }

    /// Write `image` to a temp PNG and run tesseract on it. `extra` is the
    /// trailing config name (e.g. `tsv`), if any.
    fn run(&self, image: &RgbaImage, lang: &str, psm: u32, extra: Option<&str>) -> Result<String, OcrError> {
        let mut tmp = tempfile::Builder::new()
            .prefix("screen-translate-")
            .suffix(".png")
            .tempfile()?;
        image
            .write_to(&mut tmp, image::ImageFormat::Png)
            .map_err(|e| OcrError::Image(e.to_string()))?;
        tmp.flush()?;

        let mut cmd = Command::new(&self.cmd);
        cmd.arg(tmp.path())
            .arg("stdout")
            .arg("-l")
            .arg(lang)
            .arg("--psm")
            .arg(psm.to_string());
        if let Some(extra) = extra {
            cmd.arg(extra);
        }

        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractEngine {
    fn text_of(&self, image: &RgbaImage, lang: &str) -> Result<String, OcrError> {
        self.run(image, lang, self.region_psm, None)
            .map(|text| text.trim().to_string())
    }

    fn tokens_of(&self, image: &RgbaImage, lang: &str) -> Result<Vec<Token>, OcrError> {
        let tsv = self.run(image, lang, self.word_psm, Some("tsv"))?;
        Ok(parse_tsv(&tsv))
    }
}

/// Extract word rows from tesseract TSV output.
///
/// Columns: `level page block par line word left top width height conf text`.
/// Only word-level rows with non-empty text are returned; confidence is kept
/// as reported (tesseract uses `-1` for rows it did not score).
pub fn parse_tsv(tsv: &str) -> Vec<Token> {
    tsv.lines()
        .skip(1)
        .filter_map(|row| {
            let cols: Vec<&str> = row.split('\t').collect();
            if cols.len() < 12 {
                return None;
            }
            if cols[0].parse::<i32>().ok()? != WORD_LEVEL {
                return None;
            }
            let text = cols[11].trim();
            if text.is_empty() {
                return None;
            }
            Some(Token {
                text: text.to_string(),
                x: cols[6].parse().ok()?,
                y: cols[7].parse().ok()?,
                width: cols[8].parse().ok()?,
                height: cols[9].parse().ok()?,
                confidence: cols[10].parse().unwrap_or(-1.0),
            })
        })
        .collect()
}
