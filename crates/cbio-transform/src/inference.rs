//! Column type inference from string content.

use cbio_common::parse_f64;
use cbio_model::DataType;

/// Literals a column may consist of to be classified `BOOLEAN`.
pub const BOOLEAN_LITERALS: [&str; 6] = ["True", "False", "true", "false", "0", "1"];

/// Classifies a column whose missing values are already `None`.
///
/// Precedence is fixed:
///
/// 1. empty or all-null → `STRING`
/// 2. every value parses as a real number → `NUMBER`
/// 3. every value is a boolean literal → `BOOLEAN`
/// 4. otherwise → `STRING`
///
/// A column of only `0`/`1` is therefore `NUMBER`.
pub fn infer_type(cells: &[Option<String>]) -> DataType {
    let mut values = cells.iter().flatten().peekable();
    if values.peek().is_none() {
        return DataType::String;
    }
    if values.clone().all(|value| parse_f64(value).is_some()) {
        return DataType::Number;
    }
    if values.all(|value| BOOLEAN_LITERALS.contains(&value.as_str())) {
        return DataType::Boolean;
    }
    DataType::String
}
