// curator-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unknown rule '{rule}' declared on column '{column}' of table '{table}'")]
    #[diagnostic(
        code(curator::domain::unknown_rule),
        help(
            "Known rules: primary_key, not_null, positive, non_negative, check_date_format, exists_in_<table>, multiple_of_quantity_unit_price, or a list of allowed values."
        )
    )]
    UnknownRule {
        table: String,
        column: String,
        rule: String,
    },

    #[error("Invalid parameter for rule on column '{column}': {reason}")]
    #[diagnostic(code(curator::domain::rule_parameter))]
    InvalidRuleParameter { column: String, reason: String },

    #[error("Invalid date pattern '{0}'")]
    #[diagnostic(
        code(curator::domain::date_pattern),
        help("Use chrono strftime items, e.g. '%Y-%m-%d'.")
    )]
    InvalidDatePattern(String),

    #[error("Rule grammar error: {0}")]
    #[diagnostic(code(curator::domain::rule_grammar))]
    RuleGrammar(#[from] regex::Error),

    #[error("No reference index registered for {table}.{column}")]
    #[diagnostic(
        code(curator::domain::unresolved_reference),
        help("The referenced table must be validated before the table that points to it.")
    )]
    UnresolvedReference { table: String, column: String },
}
