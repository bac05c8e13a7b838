//! Abstract commands passed from the dispatcher to the router.

use std::fmt;

/// Verbs with a direct network API implementation.
pub mod verbs {
    /// List chains connected to ZetaChain.
    pub const LIST_CHAINS: &str = "query chains list";
    /// List ZRC-20 tokens.
    pub const LIST_TOKENS: &str = "query tokens list";
    /// Native balance of an address.
    pub const BALANCES: &str = "query balances";
    /// Current gas price / fee estimate.
    pub const FEES: &str = "query fees";
    /// Testnet faucet drip.
    pub const FAUCET: &str = "faucet";
    /// Network reachability and head block.
    pub const STATUS: &str = "query status";
}

/// Canonical `(verb, ordered argument tokens)` representation of a call.
///
/// The verb is the space-separated CLI subcommand path; the arguments follow
/// it verbatim on the command line, so their order matters.
///
/// # Examples
///
/// ```
/// use zeta_core::AbstractCommand;
///
/// let command = AbstractCommand::new("query balances")
///     .flag("--address", "0xabc")
///     .flag("--network", "testnet");
///
/// assert_eq!(command.flag_value("--network"), Some("testnet"));
/// assert_eq!(
///     command.tokens(),
///     ["query", "balances", "--address", "0xabc", "--network", "testnet"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractCommand {
    /// Operation identifier.
    pub verb: String,

    /// Ordered argument tokens.
    pub args: Vec<String>,
}

impl AbstractCommand {
    /// Creates a command with no arguments.
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            args: Vec::new(),
        }
    }

    /// Creates a command with the given argument tokens.
    pub fn with_args<I, S>(verb: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verb: verb.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a positional token.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Appends `flag value`.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(flag.into());
        self.args.push(value.into());
        self
    }

    /// Returns the token following the first occurrence of `flag`.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Returns `true` if `flag` appears among the arguments.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Full token list: verb words followed by the arguments.
    pub fn tokens(&self) -> Vec<String> {
        self.verb
            .split_whitespace()
            .map(str::to_string)
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for AbstractCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.verb)
        } else {
            write!(f, "{} {}", self.verb, self.args.join(" "))
        }
    }
}
