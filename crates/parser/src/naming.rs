//! Naming conventions for generated identifiers and files
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`camel_case`] | `snakeCase` |
//! | `PascalCase` | [`lower_first`] | `pascalCase` |
//! | `.pkg.Type` | [`remove_package`] | `Type` |
//! | `dir/file.proto` | [`output_file_name`] | `dir/file.js` |

use twirp_flow_common::OUTPUT_EXTENSION;

const SCHEMA_EXTENSIONS: [&str; 2] = [".proto", ".protodevel"];

/// Convert a snake_case wire name to a lowerCamelCase identifier
///
/// Every word after the first is capitalized and the rest of each word is
/// lowercased, so `user_ID` becomes `userId`. Empty words are dropped.
///
/// # Examples
/// ```
/// use twirp_flow_parser::naming::camel_case;
///
/// assert_eq!(camel_case("created_at"), "createdAt");
/// assert_eq!(camel_case("id"), "id");
/// ```
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for (i, part) in s.split('_').enumerate() {
        if i == 0 {
            result.push_str(&part.to_lowercase());
            continue;
        }

        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(&chars.as_str().to_lowercase());
        }
    }

    result
}

/// Lowercase the first character, leaving the rest untouched
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Strip the package qualification from a (possibly dotted) type name
pub fn remove_package(s: &str) -> &str {
    s.rsplit('.').next().unwrap_or(s)
}

/// Map a schema file path to the path of its generated module
pub fn output_file_name(schema_file: &str) -> String {
    let stem = SCHEMA_EXTENSIONS
        .iter()
        .find_map(|ext| schema_file.strip_suffix(ext))
        .unwrap_or(schema_file);

    format!("{}{}", stem, OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("user_ID"), "userId");
        assert_eq!(camel_case("Name"), "name");
        assert_eq!(camel_case("a_b_c"), "aBC");
        assert_eq!(camel_case("double__underscore"), "doubleUnderscore");
        assert_eq!(camel_case("trailing_"), "trailing");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("MakeHat"), "makeHat");
        assert_eq!(lower_first("Size"), "size");
        assert_eq!(lower_first("already"), "already");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_remove_package() {
        assert_eq!(remove_package(".twitch.twirp.example.Hat"), "Hat");
        assert_eq!(remove_package("Hat"), "Hat");
        assert_eq!(remove_package(".pkg.Outer.Inner"), "Inner");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("service.proto"), "service.js");
        assert_eq!(output_file_name("api/v1/hats.proto"), "api/v1/hats.js");
        assert_eq!(output_file_name("legacy.protodevel"), "legacy.js");
        assert_eq!(output_file_name("noext"), "noext.js");
        assert_eq!(output_file_name("dotted.v1.proto"), "dotted.v1.js");
    }
}
