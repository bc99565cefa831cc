mod literal;
mod part;
mod value;

pub use literal::Literal;
pub use part::FormattedPart;
pub use value::Value;
