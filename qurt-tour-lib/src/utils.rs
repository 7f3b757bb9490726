//! contains small utility functions that have nowhere else to go

/// Removes blank lines at the end of `text`, and the newline before them.
pub fn trim_trailing_blank_lines(text: &str) -> &str {
    let mut end = text.len();
    for line in text.split('\n').rev() {
        if !line.trim().is_empty() {
            break;
        }
        end = end.saturating_sub(line.len() + 1);
    }
    &text[..end.min(text.len())]
}

macro_rules! bug {
    ($msg:literal $(, $args:tt)*) => {
        panic!(concat!("A tour engine bug occured:\n\n", $msg) $(, $args)*)
    };
}

pub(crate) use bug;
