use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngredientError {
    /// Stored ingredient data that does not parse back into a list of
    /// ingredients. This is a data-integrity failure and must surface to
    /// the caller rather than degrade to an empty list.
    #[error("Malformed ingredient data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Ingredient {name:?} has a negative amount ({amount})")]
    NegativeAmount { name: String, amount: f64 },

    #[error("Recipe lookup failed: {0}")]
    Lookup(String),
}
