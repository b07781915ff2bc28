//! Attribute-name tokenization.

/// Splits an attribute name into lower-cased word tokens.
///
/// The name is split on underscores and whitespace first; each segment is
/// then split before every upper-case letter that does not open the segment.
/// Empty tokens are dropped. Whitespace counts as a separator so display
/// names such as `Base Color` tokenize like `_BaseColor`.
///
/// ```
/// use matconv_map::tokenize;
///
/// assert_eq!(tokenize("_BaseColorMap"), vec!["base", "color", "map"]);
/// assert_eq!(tokenize("metallic_GlossMap"), vec!["metallic", "gloss", "map"]);
/// ```
pub fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for segment in name.split('_') {
        let mut current = String::new();
        for ch in segment.chars() {
            if ch.is_whitespace() {
                flush(&mut tokens, &mut current);
                continue;
            }
            if ch.is_uppercase() {
                flush(&mut tokens, &mut current);
            }
            current.extend(ch.to_lowercase());
        }
        flush(&mut tokens, &mut current);
    }
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Lower-cases a name and strips its leading and trailing underscores.
///
/// Equality and containment checks in the scorer run on this form, so the
/// conventional `_` prefix never blocks a containment match.
pub fn normalize_name(name: &str) -> String {
    name.trim().trim_matches('_').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_underscores_then_camel_case() {
        assert_eq!(tokenize("_MainTex"), vec!["main", "tex"]);
        assert_eq!(tokenize("BaseColor_Map"), vec!["base", "color", "map"]);
        assert_eq!(tokenize("__Detail__Normal_"), vec!["detail", "normal"]);
    }

    #[test]
    fn whitespace_separates_tokens() {
        assert_eq!(tokenize("Base Color"), tokenize("_BaseColor"));
        assert_eq!(tokenize(" detail\tmask "), vec!["detail", "mask"]);
    }

    #[test]
    fn upper_case_runs_split_per_letter() {
        assert_eq!(tokenize("_UVSec"), vec!["u", "v", "sec"]);
    }

    #[test]
    fn lowercase_single_token_is_unchanged() {
        assert_eq!(tokenize("gloss"), vec!["gloss"]);
        assert_eq!(tokenize(&tokenize("gloss")[0]), vec!["gloss"]);
    }

    #[test]
    fn empty_and_separator_only_names_have_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("___").is_empty());
    }

    #[test]
    fn normalize_strips_decoration() {
        assert_eq!(normalize_name("_BaseColor"), "basecolor");
        assert_eq!(normalize_name("Detail_Albedo_"), "detail_albedo");
    }
}
