//! Argument coercion: hash detection, lookup targets, and RPC parameters.

use nodecli_client::BlockId;
use serde_json::{Number, Value};

/// Length of a hex-encoded transaction or block hash.
pub(crate) const HASH_LENGTH: usize = 64;

/// Returns true when `token` has the length of a hex hash.
///
/// Only the length is checked; the node rejects malformed hex.
pub(crate) fn is_hash(token: &str) -> bool {
    token.chars().count() == HASH_LENGTH
}

/// Target of a `tx` or `coin` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    Hash(String),
    Address(String),
}

impl Lookup {
    pub(crate) fn classify(token: String) -> Self {
        if is_hash(&token) {
            Self::Hash(token)
        } else {
            Self::Address(token)
        }
    }
}

/// Classifies a block reference. Heights are forwarded as typed.
pub(crate) fn block_id(token: String) -> BlockId {
    if is_hash(&token) {
        BlockId::Hash(token)
    } else {
        BlockId::Height(token)
    }
}

/// A positional parameter for a raw procedure call.
///
/// Tokens are decoded as JSON; anything that is not valid JSON is sent as a
/// plain string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RpcParam {
    Number(Number),
    String(String),
    Bool(bool),
    Null,
    Structured(Value),
}

impl RpcParam {
    pub(crate) fn parse(token: &str) -> Self {
        match serde_json::from_str::<Value>(token) {
            Ok(Value::Number(number)) => Self::Number(number),
            Ok(Value::String(text)) => Self::String(text),
            Ok(Value::Bool(flag)) => Self::Bool(flag),
            Ok(Value::Null) => Self::Null,
            Ok(structured) => Self::Structured(structured),
            Err(_) => Self::String(token.to_owned()),
        }
    }
}

impl From<RpcParam> for Value {
    fn from(param: RpcParam) -> Self {
        match param {
            RpcParam::Number(number) => Self::Number(number),
            RpcParam::String(text) => Self::String(text),
            RpcParam::Bool(flag) => Self::Bool(flag),
            RpcParam::Null => Self::Null,
            RpcParam::Structured(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::short(63, false)]
    #[case::exact(64, true)]
    #[case::long(65, false)]
    fn hash_detection_is_by_length(#[case] length: usize, #[case] expected: bool) {
        assert_eq!(is_hash(&"a".repeat(length)), expected);
    }

    #[test]
    fn non_hash_tokens_are_addresses() {
        let token = String::from("mzTyZ6bVb1nWbTGTz1pr2nVRGk2GHoZ4yV");
        assert_eq!(Lookup::classify(token.clone()), Lookup::Address(token));
    }

    #[test]
    fn heights_are_not_validated() {
        assert_eq!(
            block_id(String::from("-7")),
            BlockId::Height(String::from("-7"))
        );
    }

    #[rstest]
    #[case::integer("1", json!(1))]
    #[case::float("2.5", json!(2.5))]
    #[case::bare_word("two", json!("two"))]
    #[case::quoted("\"two\"", json!("two"))]
    #[case::boolean("true", json!(true))]
    #[case::null("null", Value::Null)]
    #[case::array("[1,2]", json!([1, 2]))]
    #[case::object("{\"a\":1}", json!({"a": 1}))]
    #[case::hex("00ff", json!("00ff"))]
    fn rpc_params_decode_json_or_fall_back(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(Value::from(RpcParam::parse(token)), expected);
    }
}
