//! BuildIf predicates: cheap pre-filters over raw data.

use serde_json::Value;

use crate::descriptor::Literal;

/// Inspects raw data and accepts or rejects building a class from it.
///
/// Checkers run before construction is attempted during union resolution.
/// They never replace the structural checks done while binding parameters.
pub trait Checker: Send + Sync {
    /// `true` if the class may be built from `raw`.
    fn check(&self, raw: &Value) -> bool;
}

impl<F> Checker for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn check(&self, raw: &Value) -> bool {
        self(raw)
    }
}

/// Accepts maps that contain `field`.
#[derive(Clone, Copy, Debug)]
pub struct HasField(pub &'static str);

impl Checker for HasField {
    fn check(&self, raw: &Value) -> bool {
        raw.get(self.0).is_some()
    }
}

/// Accepts maps whose `field` equals `value`.
#[derive(Clone, Copy, Debug)]
pub struct FieldEquals {
    /// Key to inspect.
    pub field: &'static str,
    /// Expected value.
    pub value: Literal,
}

impl Checker for FieldEquals {
    fn check(&self, raw: &Value) -> bool {
        raw.get(self.field).is_some_and(|v| self.value.matches(v))
    }
}

/// Accepts raw data that every inner checker accepts.
#[derive(Clone, Copy)]
pub struct AllOf(pub &'static [&'static dyn Checker]);

impl Checker for AllOf {
    fn check(&self, raw: &Value) -> bool {
        self.0.iter().all(|c| c.check(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static OWNER: FieldEquals = FieldEquals { field: "status", value: Literal::Str("creator") };
    static HAS_USER: HasField = HasField("user");
    static BOTH: AllOf = AllOf(&[&OWNER, &HAS_USER]);

    #[test]
    fn field_equals() {
        assert!(OWNER.check(&json!({"status": "creator"})));
        assert!(!OWNER.check(&json!({"status": "member"})));
        assert!(!OWNER.check(&json!({})));
        assert!(!OWNER.check(&json!("creator")));
    }

    #[test]
    fn all_of_requires_every_checker() {
        assert!(BOTH.check(&json!({"status": "creator", "user": {}})));
        assert!(!BOTH.check(&json!({"status": "creator"})));
    }

    #[test]
    fn closures_are_checkers() {
        let positive = |raw: &Value| raw.as_i64().is_some_and(|n| n > 0);
        assert!(positive.check(&json!(3)));
        assert!(!positive.check(&json!(-3)));
    }
}
