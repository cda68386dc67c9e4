use num_format::{Locale, ToFormattedString};

/// thousands separated, e.g. `12,345`
pub fn grouped(value: u32) -> String {
    value.to_formatted_string(&Locale::en)
}
