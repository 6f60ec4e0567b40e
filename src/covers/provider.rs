pub mod http_cover_provider;
pub mod simulated_cover_provider;

// matches either the bare variant or a "{book_id}-{variant}" cover name
pub(crate) fn matches_variant(name: &str, variants: &[String]) -> bool {
    variants.iter().any(|v| name == v || name.ends_with(format!("-{}", v).as_str()))
}
