use crate::models::QRCode;

const DARK: &str = "██";
const LIGHT: &str = "  ";

/// Render as text, two characters per module, one line per row
pub fn to_text(code: &QRCode, quiet_zone: usize) -> String {
    let n = code.module_count();
    let total = n + 2 * quiet_zone;
    let mut out = String::with_capacity(total * (total * DARK.len() + 1));
    for r in 0..total {
        for c in 0..total {
            let inside = (quiet_zone..quiet_zone + n).contains(&r)
                && (quiet_zone..quiet_zone + n).contains(&c);
            let dark = inside && code.is_dark(r - quiet_zone, c - quiet_zone);
            out.push_str(if dark { DARK } else { LIGHT });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use crate::models::ECLevel;

    #[test]
    fn test_text_dimensions() {
        let code = generate("hi", 1, ECLevel::M).unwrap();
        let text = to_text(&code, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|l| l.chars().count() == 50));
        assert!(lines[0].trim().is_empty());
        // Finder top edge starts after the quiet zone
        assert!(lines[2].starts_with("    ██████████████  "));
    }
}
