use core_types::{Leg, SwapBundle, TransactionDescriptor};

/// The execution plan for one run, computed once from the bundle.
///
/// Modeling the conditional as a tagged variant keeps the branch decision in
/// one place; the pipeline interprets whichever variant it gets with the same
/// generic submit-then-confirm routine.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionPlan<'a> {
    /// The source asset needs an allowance grant mined before the swap.
    WithApproval {
        approve: &'a TransactionDescriptor,
        swap: &'a TransactionDescriptor,
    },
    /// Native-asset swap; no prerequisite transaction.
    Direct { swap: &'a TransactionDescriptor },
}

impl<'a> ExecutionPlan<'a> {
    pub fn from_bundle(bundle: &'a SwapBundle) -> Self {
        match &bundle.approve_transaction {
            Some(approve) => ExecutionPlan::WithApproval {
                approve,
                swap: &bundle.swap_transaction,
            },
            None => ExecutionPlan::Direct {
                swap: &bundle.swap_transaction,
            },
        }
    }

    /// The legs to run, in order. The approval leg, when present, always
    /// precedes the swap leg: the swap may depend on the allowance it grants.
    pub fn legs(&self) -> Vec<(Leg, &'a TransactionDescriptor)> {
        match self {
            ExecutionPlan::WithApproval { approve, swap } => {
                vec![(Leg::Approval, approve), (Leg::Swap, swap)]
            }
            ExecutionPlan::Direct { swap } => vec![(Leg::Swap, swap)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Fee, Quote, TokenInfo};
    use rust_decimal::Decimal;

    fn descriptor(to: &str) -> TransactionDescriptor {
        TransactionDescriptor {
            to: to.to_string(),
            value: 0,
            data: "0x".to_string(),
            chain_id: 8453,
            gas: 21_000,
        }
    }

    fn token(symbol: &str) -> TokenInfo {
        TokenInfo {
            address: String::new(),
            chain_id: 8453,
            decimals: 18,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
        }
    }

    fn bundle(approve: Option<TransactionDescriptor>) -> SwapBundle {
        SwapBundle {
            swap_transaction: descriptor("0x123"),
            approve_transaction: approve,
            quote: Quote {
                from: token("ETH"),
                to: token("DEGEN"),
                from_amount: "100000000000000".to_string(),
                to_amount: "19395353519910973703".to_string(),
                price_impact: Decimal::new(94, 2),
                slippage: Decimal::new(3, 0),
            },
            fee: Fee {
                base_asset: token("DEGEN"),
                percentage: Decimal::ONE,
                amount: "195912661817282562".to_string(),
            },
        }
    }

    #[test]
    fn a_bundle_with_an_approval_plans_two_legs_in_order() {
        let bundle = bundle(Some(descriptor("0x456")));
        let plan = ExecutionPlan::from_bundle(&bundle);

        let legs = plan.legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].0, Leg::Approval);
        assert_eq!(legs[0].1.to, "0x456");
        assert_eq!(legs[1].0, Leg::Swap);
        assert_eq!(legs[1].1.to, "0x123");
    }

    #[test]
    fn a_bundle_without_an_approval_plans_a_single_leg() {
        let bundle = bundle(None);
        let plan = ExecutionPlan::from_bundle(&bundle);

        assert!(matches!(plan, ExecutionPlan::Direct { .. }));
        let legs = plan.legs();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].0, Leg::Swap);
    }
}
