use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::node::Config;

/// The closed set of actions a workflow node can perform.
///
/// Each variant owns a static parameter schema ([`ActionType::params`]) that
/// drives the config form, required-field validation and preview rendering.
/// Adding an action is one variant here plus one schema table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Generic outbound HTTP call.
    HttpRequest,
    /// Call a function on a deployed contract.
    SmartContractCall,
    /// Token swap routed through a DEX aggregator.
    DefiSwap,
    /// Plain token transfer to a recipient.
    TokenTransfer,
    /// Send a notification email.
    EmailSend,
    /// Module-library swap (BTC/sBTC style tokens).
    Swap,
    /// Solana swap through Jupiter on devnet.
    JupiterSwap,
    /// Stake tokens into a pool.
    Stake,
    /// Harvest pool rewards.
    Claim,
    /// Move funds between chains.
    Bridge,
    /// Lightning network payment.
    Lightning,
}

/// Input widget / value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Text,
    Textarea,
    Select,
    Switch,
    Json,
}

/// Value a fresh node starts with for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Preset {
    Text(&'static str),
    Flag(bool),
}

/// One entry of an action's parameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Preset>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub placeholder: &'static str,
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

impl ParamSpec {
    const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            param_type: ParamType::Text,
            required: false,
            options: &[],
            default: None,
            placeholder: "",
        }
    }

    const fn textarea(key: &'static str, label: &'static str) -> Self {
        Self {
            param_type: ParamType::Textarea,
            ..Self::text(key, label)
        }
    }

    const fn json(key: &'static str, label: &'static str) -> Self {
        Self {
            param_type: ParamType::Json,
            ..Self::text(key, label)
        }
    }

    const fn select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            param_type: ParamType::Select,
            options,
            ..Self::text(key, label)
        }
    }

    const fn switch(key: &'static str, label: &'static str, on: bool) -> Self {
        Self {
            param_type: ParamType::Switch,
            default: Some(Preset::Flag(on)),
            ..Self::text(key, label)
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn preset(mut self, value: &'static str) -> Self {
        self.default = Some(Preset::Text(value));
        self
    }

    const fn hint(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Sidebar grouping of actions in the module library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionGroup {
    #[serde(rename = "General")]
    General,
    #[serde(rename = "Core Operations")]
    Core,
    #[serde(rename = "Solana Operations")]
    Solana,
    #[serde(rename = "Bitcoin Operations")]
    Bitcoin,
}

const SOLANA_TOKENS: &[&str] = &["SOL", "USDC", "USDT", "mSOL"];
const BTC_TOKENS: &[&str] = &["BTC", "sBTC", "STX", "YIELD"];
const CHAINS: &[&str] = &["Bitcoin", "sBTC Network", "Stacks", "Solana"];

const HTTP_REQUEST: &[ParamSpec] = &[
    ParamSpec::text("url", "URL").required().hint("https://api.example.com/endpoint"),
    ParamSpec::select("method", "Method", &["GET", "POST", "PUT", "DELETE"])
        .required()
        .preset("GET"),
    ParamSpec::json("headers", "Headers"),
    ParamSpec::textarea("body", "Body"),
];

const SMART_CONTRACT_CALL: &[ParamSpec] = &[
    ParamSpec::text("contractAddress", "Contract Address").required(),
    ParamSpec::text("functionName", "Function Name").required(),
    ParamSpec::json("arguments", "Arguments"),
    ParamSpec::select("network", "Network", &["devnet", "testnet", "mainnet"]).preset("devnet"),
];

const DEFI_SWAP: &[ParamSpec] = &[
    ParamSpec::select("inputToken", "Input Token", SOLANA_TOKENS).required(),
    ParamSpec::select("outputToken", "Output Token", SOLANA_TOKENS).required(),
    ParamSpec::text("amount", "Amount").required().hint("1.0"),
    ParamSpec::text("slippageBps", "Slippage (bps)").preset("50"),
    ParamSpec::select("protocol", "Protocol", &["jupiter", "raydium", "orca"]),
];

const TOKEN_TRANSFER: &[ParamSpec] = &[
    ParamSpec::select("token", "Token", SOLANA_TOKENS).required(),
    ParamSpec::text("recipient", "Recipient").required(),
    ParamSpec::text("amount", "Amount").required(),
];

const EMAIL_SEND: &[ParamSpec] = &[
    ParamSpec::text("to", "To").required(),
    ParamSpec::text("subject", "Subject").required(),
    ParamSpec::textarea("body", "Body"),
];

const SWAP: &[ParamSpec] = &[
    ParamSpec::select("sourceToken", "Source Token", BTC_TOKENS).required().preset("BTC"),
    ParamSpec::select("targetToken", "Target Token", BTC_TOKENS).required().preset("sBTC"),
    ParamSpec::text("amount", "Amount").required().preset("0.5"),
    ParamSpec::text("slippage", "Slippage (%)").preset("1"),
    ParamSpec::switch("useBestRoute", "Use Best Route", true),
];

const JUPITER_SWAP: &[ParamSpec] = &[
    ParamSpec::select("inputMint", "Input Token", SOLANA_TOKENS).required().preset("SOL"),
    ParamSpec::select("outputMint", "Output Token", SOLANA_TOKENS).required().preset("USDC"),
    ParamSpec::text("amount", "Amount").required().hint("0.1"),
    ParamSpec::text("slippageBps", "Slippage (bps)").preset("50"),
];

const STAKE: &[ParamSpec] = &[
    ParamSpec::select("asset", "Asset", BTC_TOKENS).required().preset("sBTC"),
    ParamSpec::text("pool", "Pool").required().preset("Yield Farm"),
    ParamSpec::text("lockPeriod", "Lock Period (days)").preset("30"),
    ParamSpec::switch("autoCompound", "Auto Compound", true),
];

const CLAIM: &[ParamSpec] = &[
    ParamSpec::text("fromPool", "From Pool").required().preset("Yield Farm"),
    ParamSpec::select("token", "Reward Token", BTC_TOKENS).required().preset("YIELD"),
    ParamSpec::switch("autoReinvest", "Auto Reinvest", false),
];

const BRIDGE: &[ParamSpec] = &[
    ParamSpec::select("sourceChain", "Source Chain", CHAINS).required().preset("Bitcoin"),
    ParamSpec::select("targetChain", "Target Chain", CHAINS).required().preset("sBTC Network"),
    ParamSpec::text("amount", "Amount").required().preset("0.1"),
];

const LIGHTNING: &[ParamSpec] = &[
    ParamSpec::text("recipient", "Recipient").required().hint("lightning@example.com"),
    ParamSpec::text("amount", "Amount").required().preset("0.01"),
    ParamSpec::textarea("memo", "Memo"),
];

impl ActionType {
    pub const ALL: [ActionType; 11] = [
        ActionType::HttpRequest,
        ActionType::SmartContractCall,
        ActionType::DefiSwap,
        ActionType::TokenTransfer,
        ActionType::EmailSend,
        ActionType::Swap,
        ActionType::JupiterSwap,
        ActionType::Stake,
        ActionType::Claim,
        ActionType::Bridge,
        ActionType::Lightning,
    ];

    /// Wire name, as used in the `actionType` field and in preview steps.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::HttpRequest => "httpRequest",
            ActionType::SmartContractCall => "smartContractCall",
            ActionType::DefiSwap => "defiSwap",
            ActionType::TokenTransfer => "tokenTransfer",
            ActionType::EmailSend => "emailSend",
            ActionType::Swap => "swap",
            ActionType::JupiterSwap => "jupiterSwap",
            ActionType::Stake => "stake",
            ActionType::Claim => "claim",
            ActionType::Bridge => "bridge",
            ActionType::Lightning => "lightning",
        }
    }

    pub fn parse(name: &str) -> Option<ActionType> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Label a freshly dropped node gets.
    pub fn default_label(self) -> &'static str {
        match self {
            ActionType::HttpRequest => "HTTP Request",
            ActionType::SmartContractCall => "Smart Contract",
            ActionType::DefiSwap => "Token Swap",
            ActionType::TokenTransfer => "Token Transfer",
            ActionType::EmailSend => "Send Email",
            ActionType::Swap => "Swap",
            ActionType::JupiterSwap => "Jupiter Swap",
            ActionType::Stake => "Stake",
            ActionType::Claim => "Claim Rewards",
            ActionType::Bridge => "BTC Bridge",
            ActionType::Lightning => "Lightning",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActionType::HttpRequest => "Make an API call",
            ActionType::SmartContractCall => "Execute a contract function",
            ActionType::DefiSwap => "Swap between tokens",
            ActionType::TokenTransfer => "Send tokens to an address",
            ActionType::EmailSend => "Send an email notification",
            ActionType::Swap => "Exchange tokens",
            ActionType::JupiterSwap => "Swap Solana tokens via Jupiter on Devnet",
            ActionType::Stake => "Stake your tokens",
            ActionType::Claim => "Harvest your rewards",
            ActionType::Bridge => "Bridge BTC to sBTC",
            ActionType::Lightning => "Lightning payment",
        }
    }

    pub fn group(self) -> ActionGroup {
        match self {
            ActionType::HttpRequest
            | ActionType::SmartContractCall
            | ActionType::DefiSwap
            | ActionType::TokenTransfer
            | ActionType::EmailSend => ActionGroup::General,
            ActionType::Swap | ActionType::Stake | ActionType::Claim => ActionGroup::Core,
            ActionType::JupiterSwap => ActionGroup::Solana,
            ActionType::Bridge | ActionType::Lightning => ActionGroup::Bitcoin,
        }
    }

    /// The parameter schema for this action.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            ActionType::HttpRequest => HTTP_REQUEST,
            ActionType::SmartContractCall => SMART_CONTRACT_CALL,
            ActionType::DefiSwap => DEFI_SWAP,
            ActionType::TokenTransfer => TOKEN_TRANSFER,
            ActionType::EmailSend => EMAIL_SEND,
            ActionType::Swap => SWAP,
            ActionType::JupiterSwap => JUPITER_SWAP,
            ActionType::Stake => STAKE,
            ActionType::Claim => CLAIM,
            ActionType::Bridge => BRIDGE,
            ActionType::Lightning => LIGHTNING,
        }
    }

    pub fn param(self, key: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|p| p.key == key)
    }

    /// Swap-type actions are the ones the pricing engine can quote.
    pub fn is_swap(self) -> bool {
        matches!(
            self,
            ActionType::DefiSwap | ActionType::Swap | ActionType::JupiterSwap
        )
    }

    /// Config a node starts with: every parameter that has a preset.
    pub fn default_config(self) -> Config {
        self.params()
            .iter()
            .filter_map(|p| {
                let value = match p.default? {
                    Preset::Text(s) => serde_json::Value::String(s.to_string()),
                    Preset::Flag(b) => serde_json::Value::Bool(b),
                };
                Some((p.key.to_string(), value))
            })
            .collect()
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a config value counts as "set" for required-field checks and
/// preview rendering.
pub fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Render a config value the way the config panel shows it.
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
