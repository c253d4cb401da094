//! Output formatting and display utilities

use crate::api::ApiQueryResponse;
use crate::config::OutputConfig;
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Render a response result as JSON text
pub fn render_response<T: Serialize>(response: &ApiQueryResponse<T>, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(rendered)
}

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write a response result to the configured output, newline-terminated
    pub fn write_response<T: Serialize>(&self, response: &ApiQueryResponse<T>) -> Result<()> {
        let mut rendered = render_response(response, self.config.pretty)?;
        rendered.push('\n');
        self.write(&rendered)
    }

    /// Write content to configured output
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(content, file_path)
        } else {
            self.write_to_stdout(content)
        }
    }

    fn write_to_file(&self, content: &str, file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &str) -> Result<()> {
        io::stdout().write_all(content.as_bytes())?;
        Ok(())
    }
}
