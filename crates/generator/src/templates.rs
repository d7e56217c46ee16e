//! Template loading

use tera::Tera;
use twirp_flow_common::{GeneratorError, Result};

/// Template rendering one client module per schema file
pub const CLIENT_TEMPLATE: &str = "client.js";

/// Template holding the shared request runtime
pub const RUNTIME_TEMPLATE: &str = "twirp.js";

/// Load all templates
///
/// Template names end in `.js`, so Tera never HTML-escapes the conversion
/// expressions they print.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(CLIENT_TEMPLATE, include_str!("../templates/client.js.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load client.js template: {}", e))
        })?;

    tera.add_raw_template(RUNTIME_TEMPLATE, include_str!("../templates/twirp.js.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load twirp.js template: {}", e))
        })?;

    Ok(tera)
}
