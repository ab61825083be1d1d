/// US states plus the District of Columbia, ordered by abbreviation
pub const STATES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// Canonical `(abbreviation, name)` entry for an abbreviation (case-insensitive)
#[must_use]
pub fn find_state(abbr: &str) -> Option<(&'static str, &'static str)> {
    STATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(abbr))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete_and_sorted() {
        assert_eq!(STATES.len(), 51);
        assert!(STATES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_find_state() {
        assert_eq!(find_state("CA"), Some(("CA", "California")));
        assert_eq!(find_state("dc"), Some(("DC", "District of Columbia")));
        assert_eq!(find_state("ZZ"), None);
        assert_eq!(find_state(""), None);
        assert_eq!(find_state("wv"), Some(("WV", "West Virginia")));
    }
}
