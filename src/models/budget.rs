const BUDGET_LABELS: [(&str, &str); 4] = [
    ("vitrine", "50k - 100k FCFA (Site vitrine)"),
    ("ecommerce", "100k - 200k FCFA (E-commerce)"),
    ("app", "200k - 400k FCFA (Application web)"),
    ("custom", "Plus de 400k FCFA (Sur mesure)"),
];

/// Maps a budget code to its display label. Unknown codes are returned as-is.
pub fn resolve_budget_label(code: &str) -> &str {
    BUDGET_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |&(_, label)| label)
}
