//! Tool argument validation and command construction.
//!
//! Raw JSON arguments are checked once against a [`ToolSpec`] and turned into
//! typed [`ArgValue`]s; the abstract command is then built from those values
//! in the tool's parameter order.

use crate::catalog::{Param, ParamKind, Placement, ToolSpec};
use crate::command::AbstractCommand;
use crate::error::{Result, ZetaError};
use serde_json::{Map, Value};

/// A validated, present argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Text, number or choice, already rendered as a token.
    Scalar(String),
    /// An enabled switch.
    Switch,
    /// A non-empty list of tokens.
    List(Vec<String>),
}

impl ArgValue {
    fn push_tokens(&self, placement: Placement, out: &mut Vec<String>) {
        if let Placement::Flag(flag) = placement {
            out.push(flag.to_string());
        }
        match self {
            Self::Scalar(value) => out.push(value.clone()),
            Self::Switch => {}
            Self::List(values) => out.extend(values.iter().cloned()),
        }
    }
}

/// Arguments of one call, validated against its tool spec.
#[derive(Debug, Clone)]
pub struct ValidatedArgs {
    spec: &'static ToolSpec,
    values: Vec<(&'static Param, ArgValue)>,
}

impl ValidatedArgs {
    /// Validates `arguments` (a JSON object, or null for no arguments).
    ///
    /// Absent, null, empty-string, empty-list and `false` values are all
    /// treated as "not given".
    ///
    /// # Errors
    ///
    /// - `ZetaError::InvalidArgument` for a non-object, an unexpected field,
    ///   a wrong type or a value outside a choice
    /// - `ZetaError::MissingArgument` for a missing required field or an
    ///   unsatisfied either-of group (`"address or name"`)
    pub fn validate(spec: &'static ToolSpec, arguments: &Value) -> Result<Self> {
        let empty = Map::new();
        let object = match arguments {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(ZetaError::invalid_argument(
                    "arguments",
                    "expected a JSON object",
                ));
            }
        };

        if let Some(field) = object.keys().find(|k| spec.param(k).is_none()) {
            return Err(ZetaError::invalid_argument(
                field.as_str(),
                format!("not an argument of {}", spec.name),
            ));
        }

        let mut values = Vec::new();
        for param in spec.params {
            match object.get(param.name).map(|v| coerce(param, v)).transpose()? {
                Some(Some(ArgValue::Scalar(s)))
                    if param.placement == Placement::Positional && s.trim_start().starts_with('-') =>
                {
                    return Err(ZetaError::invalid_argument(
                        param.name,
                        "must not start with '-'",
                    ));
                }
                Some(Some(value)) => values.push((param, value)),
                _ if param.required => return Err(ZetaError::MissingArgument(param.name.to_string())),
                _ => {}
            }
        }

        for group in spec.any_of {
            if !group.iter().any(|name| values.iter().any(|(p, _)| p.name == *name)) {
                return Err(ZetaError::MissingArgument(group.join(" or ")));
            }
        }

        Ok(Self { spec, values })
    }

    /// Returns the value given for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(_, v)| v)
    }

    /// Supplies `value` for the parameter `name` when the tool has it and the
    /// caller left it out. Returns `true` if the value was added.
    pub fn fill_default(&mut self, name: &str, value: &str) -> bool {
        let params: &'static [Param] = self.spec.params;
        let Some(index) = params.iter().position(|p| p.name == name) else {
            return false;
        };
        if self.get(name).is_some() || value.trim().is_empty() {
            return false;
        }

        let param = &params[index];
        let at = self
            .values
            .iter()
            .take_while(|(p, _)| {
                params
                    .iter()
                    .position(|q| q.name == p.name)
                    .is_some_and(|i| i < index)
            })
            .count();
        self.values
            .insert(at, (param, ArgValue::Scalar(value.to_string())));
        true
    }

    /// Builds the abstract command: verb, then arguments in parameter order.
    pub fn to_command(&self) -> AbstractCommand {
        let mut args = Vec::new();
        for (param, value) in &self.values {
            value.push_tokens(param.placement, &mut args);
        }
        AbstractCommand::with_args(self.spec.verb, args)
    }
}

/// Checks one raw value; `Ok(None)` means "treat as absent".
fn coerce(param: &Param, value: &Value) -> Result<Option<ArgValue>> {
    if value.is_null() {
        return Ok(None);
    }
    let invalid = |reason: &str| ZetaError::invalid_argument(param.name, reason);

    match param.kind {
        ParamKind::Text => match value {
            Value::String(s) => Ok(non_empty(s).map(ArgValue::Scalar)),
            Value::Number(n) => Ok(Some(ArgValue::Scalar(n.to_string()))),
            _ => Err(invalid("expected a string")),
        },
        ParamKind::Number => match value {
            Value::Number(n) => Ok(Some(ArgValue::Scalar(n.to_string()))),
            Value::String(s) => match trimmed(s) {
                None => Ok(None),
                Some(s) if s.parse::<f64>().is_ok_and(f64::is_finite) => Ok(Some(ArgValue::Scalar(s))),
                Some(_) => Err(invalid("expected a number")),
            },
            _ => Err(invalid("expected a number")),
        },
        ParamKind::Switch => match value {
            Value::Bool(true) => Ok(Some(ArgValue::Switch)),
            Value::Bool(false) => Ok(None),
            _ => Err(invalid("expected a boolean")),
        },
        ParamKind::List => {
            let items = match value {
                Value::Array(items) => items,
                _ => return Err(invalid("expected an array of strings")),
            };
            let mut tokens = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => tokens.extend(non_empty(s)),
                    Value::Number(n) => tokens.push(n.to_string()),
                    Value::Bool(b) => tokens.push(b.to_string()),
                    _ => return Err(invalid("expected an array of strings")),
                }
            }
            Ok((!tokens.is_empty()).then_some(ArgValue::List(tokens)))
        }
        ParamKind::Choice(choices) => match value {
            Value::String(s) => match trimmed(s) {
                None => Ok(None),
                Some(s) if choices.contains(&s.as_str()) => Ok(Some(ArgValue::Scalar(s))),
                Some(s) => Err(invalid(&format!(
                    "'{s}' is not one of {}",
                    choices.join(", ")
                ))),
            },
            _ => Err(invalid("expected a string")),
        },
    }
}

/// Free text is passed through untouched; blank means absent.
fn non_empty(s: &str) -> Option<String> {
    (!s.trim().is_empty()).then(|| s.to_string())
}

fn trimmed(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use serde_json::json;

    fn spec(name: &str) -> &'static ToolSpec {
        Catalog::builtin().get(name).unwrap()
    }

    fn command(name: &str, arguments: Value) -> Result<AbstractCommand> {
        ValidatedArgs::validate(spec(name), &arguments).map(|a| a.to_command())
    }

    #[test]
    fn test_tokens_follow_parameter_order() {
        let cmd = command(
            "get_balances",
            json!({"network": "testnet", "address": "0xabc"}),
        )
        .unwrap();

        assert_eq!(cmd.verb, "query balances");
        assert_eq!(cmd.args, ["--address", "0xabc", "--network", "testnet"]);
    }

    #[test]
    fn test_omitted_optionals_produce_no_tokens() {
        let cmd = command(
            "evm_deposit",
            json!({
                "amount": "0.01",
                "receiver": "0xabc",
                "erc20": "",
                "chain_id": null,
            }),
        )
        .unwrap();

        assert_eq!(cmd.args, ["--amount", "0.01", "--receiver", "0xabc"]);
        assert!(cmd.args.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_switches_and_lists() {
        let cmd = command(
            "localnet_start",
            json!({"chains": ["solana", "sui"], "force_kill": true, "port": 8545}),
        )
        .unwrap();
        assert_eq!(
            cmd.args,
            ["--chains", "solana", "sui", "--port", "8545", "--force-kill"]
        );

        let cmd = command("localnet_start", json!({"chains": [], "force_kill": false})).unwrap();
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_positional_argument() {
        let cmd = command("create_project", json!({"name": "hello", "template": "call"})).unwrap();
        assert_eq!(cmd.tokens(), ["new", "hello", "--template", "call"]);
    }

    #[test]
    fn test_missing_required_names_field() {
        let err = command("evm_deposit", json!({"amount": 1})).unwrap_err();
        assert!(matches!(err, ZetaError::MissingArgument(ref f) if f == "receiver"));

        let err = command("get_balances", json!({"network": "testnet"})).unwrap_err();
        assert_eq!(err.to_string(), "missing required argument: address or name");

        let err = command("import_account", json!({"name": "alice"})).unwrap_err();
        assert!(err.to_string().contains("private_key or mnemonic"));
    }

    #[test]
    fn test_empty_string_does_not_satisfy_required() {
        let err = command("get_cctx", json!({"hash": "  "})).unwrap_err();
        assert!(matches!(err, ZetaError::MissingArgument(_)));
    }

    #[test]
    fn test_invalid_arguments_name_field() {
        let err = command("list_chains", json!({"network": "devnet"})).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "network"));

        let err = command("list_chains", json!({"colour": "blue"})).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "colour"));

        let err = command("evm_deposit", json!({"amount": "lots", "receiver": "0x1"})).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "amount"));

        let err = command("list_accounts", json!({"json": "yes"})).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "json"));

        let err = command("list_accounts", json!(["json"])).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "arguments"));
    }

    #[test]
    fn test_null_arguments_are_empty() {
        let cmd = command("localnet_stop", Value::Null).unwrap();
        assert_eq!(cmd.tokens(), ["localnet", "stop"]);
    }

    #[test]
    fn test_text_values_keep_whitespace() {
        let cmd = command(
            "import_account",
            json!({"name": "alice", "mnemonic": " word1  word2 ", "type": " evm "}),
        )
        .unwrap();

        assert_eq!(
            cmd.args,
            ["--type", "evm", "--name", "alice", "--mnemonic", " word1  word2 "]
        );
    }

    #[test]
    fn test_positional_cannot_look_like_a_flag() {
        let err = command("create_project", json!({"name": "--help"})).unwrap_err();
        assert!(matches!(err, ZetaError::InvalidArgument { ref field, .. } if field == "name"));

        // Flag values are unaffected
        let cmd = command("get_fees", json!({"gas_limit": "-1"})).unwrap();
        assert_eq!(cmd.args, ["--gas-limit", "-1"]);
    }

    #[test]
    fn test_fill_default_respects_parameter_order() {
        let mut args = ValidatedArgs::validate(
            spec("get_balances"),
            &json!({"address": "0xabc"}),
        )
        .unwrap();

        assert!(args.fill_default("network", "mainnet"));
        assert_eq!(args.to_command().args, ["--address", "0xabc", "--network", "mainnet"]);

        // Never overrides, never invents parameters
        assert!(!args.fill_default("network", "testnet"));
        assert!(!args.fill_default("gas_limit", "21000"));
    }

    #[test]
    fn test_fill_default_before_later_params() {
        let mut args =
            ValidatedArgs::validate(spec("get_fees"), &json!({"gas_limit": 21000})).unwrap();
        assert!(args.fill_default("network", "testnet"));
        assert_eq!(
            args.to_command().args,
            ["--network", "testnet", "--gas-limit", "21000"]
        );

        let mut args = ValidatedArgs::validate(spec("list_accounts"), &Value::Null).unwrap();
        assert!(!args.fill_default("network", "testnet"));
        assert!(args.to_command().args.is_empty());
    }

    #[test]
    fn test_lookup_validated_value() {
        let args = ValidatedArgs::validate(
            spec("get_fees"),
            &json!({"gas_limit": "21000"}),
        )
        .unwrap();

        assert_eq!(args.get("gas_limit"), Some(&ArgValue::Scalar("21000".into())));
        assert_eq!(args.get("network"), None);
    }
}
