//! Tera-based template rendering

use std::error::Error as _;
use tera::{Context, Tera};

use crate::generation::DataModel;
use crate::templates::ResolvedTemplate;

/// Render a resolved template against a data model.
///
/// Autoescaping is off: templates produce source code and configuration, not HTML.
/// Undefined variables and syntax errors surface as `tera::Error`.
pub fn render(template: &ResolvedTemplate, model: &DataModel) -> Result<String, tera::Error> {
    let context = Context::from_value(model.to_value())?;
    Tera::one_off(&template.content, &context, false)
}

/// Flatten a tera error and its sources into one line.
///
/// Tera's top-level message only says that rendering failed; the useful detail
/// (missing variable, parse location) lives in the source chain.
pub fn describe_error(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
