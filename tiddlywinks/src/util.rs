//! Small convenience constructors for common setups.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tfunction::Function;
use tprovider::{AdapterError, AnthropicToolset, OllamaToolset, OpenAiToolset};
use tschema::ValueType;
use ttools::{Toolbox, ToolboxError};

/// Why a toolset could not be assembled: the toolbox itself was invalid,
/// or the protocol binding rejected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolsetError {
    Toolbox(ToolboxError),
    Adapter(AdapterError),
}

impl Display for ToolsetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toolbox(error) => write!(f, "{error}"),
            Self::Adapter(error) => write!(f, "{error}"),
        }
    }
}

impl Error for ToolsetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Toolbox(error) => Some(error),
            Self::Adapter(error) => Some(error),
        }
    }
}

impl From<ToolboxError> for ToolsetError {
    fn from(error: ToolboxError) -> Self {
        Self::Toolbox(error)
    }
}

impl From<AdapterError> for ToolsetError {
    fn from(error: AdapterError) -> Self {
        Self::Adapter(error)
    }
}

fn build_toolbox(
    functions: impl IntoIterator<Item = Function>,
    result_type: Option<ValueType>,
) -> Result<Toolbox, ToolboxError> {
    match result_type {
        Some(result_type) => Toolbox::with_result_type(functions, result_type),
        None => Toolbox::new(functions),
    }
}

/// Creates tools that can be used with Anthropic assistants.
pub fn anthropic_toolset(
    functions: impl IntoIterator<Item = Function>,
    result_type: Option<ValueType>,
) -> Result<AnthropicToolset, ToolsetError> {
    let toolbox = build_toolbox(functions, result_type)?;
    Ok(AnthropicToolset::new(toolbox)?)
}

/// Creates tools that can be used with OpenAI assistants.
pub fn openai_toolset(
    functions: impl IntoIterator<Item = Function>,
    result_type: Option<ValueType>,
) -> Result<OpenAiToolset, ToolsetError> {
    let toolbox = build_toolbox(functions, result_type)?;
    Ok(OpenAiToolset::new(toolbox))
}

/// Creates tools that can be used with Ollama models.
pub fn ollama_toolset(
    functions: impl IntoIterator<Item = Function>,
    result_type: Option<ValueType>,
) -> Result<OllamaToolset, ToolsetError> {
    let toolbox = build_toolbox(functions, result_type)?;
    Ok(OllamaToolset::new(toolbox))
}
