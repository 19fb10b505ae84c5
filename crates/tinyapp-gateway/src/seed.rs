use jiff::Zoned;
use tinyapp_core::{Alias, AliasRecord};

/// The two anonymous links the demo starts with.
pub const DEMO_LINKS: [(&str, &str); 2] = [
    ("b2xVn2", "http://www.lighthouselabs.ca"),
    ("9sm5xK", "http://www.google.com"),
];

/// Anonymous demo records, created today with zeroed statistics.
pub fn demo_records() -> Vec<AliasRecord> {
    let today = Zoned::now().date();
    DEMO_LINKS
        .iter()
        .map(|(alias, target)| {
            AliasRecord::new(
                Alias::new_unchecked(*alias),
                (*target).to_owned(),
                None,
                today,
            )
        })
        .collect()
}
