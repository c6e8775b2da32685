//! Decision policies.
//!
//! A policy is the pure DECIDE/BUILD step of a workflow: it inspects the
//! pre-submit query result and either produces the contract command to
//! submit or concludes that no state change is warranted. Policies never
//! touch the network.

use crate::contracts::payload::{BalanceResponse, ExecuteMsg};
use crate::error::Result;
use crate::ledger::client::QueryResult;
use crate::ledger::tx::Coin;

/// The command a policy decided to submit, plus any attached funds.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub msg: ExecuteMsg,
    pub funds: Vec<Coin>,
}

impl Decision {
    fn bare(msg: ExecuteMsg) -> Self {
        Self { msg, funds: vec![] }
    }
}

/// How a workflow decides whether (and what) to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionPolicy {
    /// Always push a new price to the oracle.
    PushPrice { price: u64 },

    /// Transfer tokens to `recipient` only while its observed balance is
    /// below `ceiling`; the amount is exactly the deficit. Skips otherwise.
    TopUp { recipient: String, ceiling: u128 },

    /// Always mint tokens to a recipient.
    Mint { recipient: String, amount: u128 },

    /// Always burn tokens from the sender's balance.
    Burn { amount: u128 },

    /// Always transfer a fixed amount to a recipient.
    Transfer { recipient: String, amount: u128 },

    /// Always buy from the swap contract, paying with attached funds.
    Buy { funds: Vec<Coin> },

    /// Always withdraw native funds from the swap contract.
    Withdraw { amount: u64 },
}

impl DecisionPolicy {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionPolicy::PushPrice { .. } => "push-price",
            DecisionPolicy::TopUp { .. } => "top-up",
            DecisionPolicy::Mint { .. } => "mint",
            DecisionPolicy::Burn { .. } => "burn",
            DecisionPolicy::Transfer { .. } => "transfer",
            DecisionPolicy::Buy { .. } => "buy",
            DecisionPolicy::Withdraw { .. } => "withdraw",
        }
    }

    /// Apply the policy to the observed pre-submit state.
    ///
    /// `Ok(None)` means the condition is not met and the workflow ends
    /// successfully without a submit phase.
    pub fn decide(&self, before: &QueryResult) -> Result<Option<Decision>> {
        match self {
            DecisionPolicy::PushPrice { price } => Ok(Some(Decision::bare(
                ExecuteMsg::UpdatePrice { price: *price },
            ))),

            DecisionPolicy::TopUp { recipient, ceiling } => {
                let observed = before.decode::<BalanceResponse>()?.balance;
                if observed >= *ceiling {
                    return Ok(None);
                }
                // Integer arithmetic: the deficit is already a whole unit
                // and can never round past the ceiling.
                Ok(Some(Decision::bare(ExecuteMsg::Transfer {
                    recipient: recipient.clone(),
                    amount: ceiling - observed,
                })))
            }

            DecisionPolicy::Mint { recipient, amount } => {
                Ok(Some(Decision::bare(ExecuteMsg::Mint {
                    recipient: recipient.clone(),
                    amount: *amount,
                })))
            }

            DecisionPolicy::Burn { amount } => {
                Ok(Some(Decision::bare(ExecuteMsg::Burn { amount: *amount })))
            }

            DecisionPolicy::Transfer { recipient, amount } => {
                Ok(Some(Decision::bare(ExecuteMsg::Transfer {
                    recipient: recipient.clone(),
                    amount: *amount,
                })))
            }

            DecisionPolicy::Buy { funds } => Ok(Some(Decision {
                msg: ExecuteMsg::Buy {},
                funds: funds.clone(),
            })),

            DecisionPolicy::Withdraw { amount } => {
                Ok(Some(Decision::bare(ExecuteMsg::Withdraw { amount: *amount })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn balance_result(balance: u128) -> QueryResult {
        QueryResult {
            contract: "terra1token".to_string(),
            value: json!({"balance": balance.to_string()}),
        }
    }

    #[test]
    fn test_top_up_skips_at_ceiling() {
        let policy = DecisionPolicy::TopUp {
            recipient: "terra1swap".to_string(),
            ceiling: 5_000_000,
        };
        assert_eq!(policy.decide(&balance_result(5_000_000)).unwrap(), None);
    }

    #[test]
    fn test_top_up_skips_above_ceiling() {
        let policy = DecisionPolicy::TopUp {
            recipient: "terra1swap".to_string(),
            ceiling: 5_000_000,
        };
        assert_eq!(policy.decide(&balance_result(7_500_000)).unwrap(), None);
    }

    #[test]
    fn test_top_up_transfers_exact_deficit() {
        let policy = DecisionPolicy::TopUp {
            recipient: "terra1swap".to_string(),
            ceiling: 5_000_000,
        };
        let decision = policy.decide(&balance_result(1_200_000)).unwrap().unwrap();
        assert_eq!(
            decision.msg,
            ExecuteMsg::Transfer {
                recipient: "terra1swap".to_string(),
                amount: 3_800_000,
            }
        );
        assert!(decision.funds.is_empty());
    }

    #[test]
    fn test_top_up_one_below_ceiling() {
        let policy = DecisionPolicy::TopUp {
            recipient: "terra1swap".to_string(),
            ceiling: 5_000_000,
        };
        let decision = policy.decide(&balance_result(4_999_999)).unwrap().unwrap();
        assert_eq!(
            decision.msg,
            ExecuteMsg::Transfer {
                recipient: "terra1swap".to_string(),
                amount: 1,
            }
        );
    }

    #[test]
    fn test_top_up_rejects_unexpected_shape() {
        let policy = DecisionPolicy::TopUp {
            recipient: "terra1swap".to_string(),
            ceiling: 5_000_000,
        };
        let before = QueryResult {
            contract: "terra1token".to_string(),
            value: json!({"price": 10}),
        };
        assert!(matches!(policy.decide(&before), Err(Error::Query { .. })));
    }

    #[test]
    fn test_push_price_is_unconditional() {
        let policy = DecisionPolicy::PushPrice { price: 10 };
        let before = QueryResult {
            contract: "terra1oracle".to_string(),
            value: json!({"price": 44}),
        };
        let decision = policy.decide(&before).unwrap().unwrap();
        assert_eq!(decision.msg, ExecuteMsg::UpdatePrice { price: 10 });
    }

    #[test]
    fn test_buy_attaches_funds() {
        let policy = DecisionPolicy::Buy {
            funds: vec![Coin::new("uluna", 1_000_000)],
        };
        let before = balance_result(0);
        let decision = policy.decide(&before).unwrap().unwrap();
        assert_eq!(decision.msg, ExecuteMsg::Buy {});
        assert_eq!(decision.funds, vec![Coin::new("uluna", 1_000_000)]);
    }
}
