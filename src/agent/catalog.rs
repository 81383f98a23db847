//! Known Octagon agent models and the instructions sent with each call.

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "octagon-sec-agent";

const GENERIC_INSTRUCTIONS: &str =
    "Analyze the provided input and return the relevant information with source citations.";
const SEC_INSTRUCTIONS: &str =
    "Analyze SEC filings based on the input and extract requested data with source citations.";
const TRANSCRIPT_INSTRUCTIONS: &str = "Analyze earnings call transcripts based on the input and extract requested information with source citations.";

/// A hosted agent the gateway exposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AgentModel {
    /// Model identifier sent upstream.
    pub id: &'static str,
    /// What the agent answers.
    pub description: &'static str,
}

/// Every agent model the gateway is known to serve.
pub const MODELS: &[AgentModel] = &[
    AgentModel {
        id: "octagon-sec-agent",
        description: "Public company SEC filings (10-K, 10-Q, 8-K), risk factors, CIK numbers",
    },
    AgentModel {
        id: "octagon-transcripts-agent",
        description: "Public company earnings call transcripts and investor commentary",
    },
    AgentModel {
        id: "octagon-financials-agent",
        description: "Financial statement analysis and ratios for public companies",
    },
    AgentModel {
        id: "octagon-stock-data-agent",
        description: "Stock prices, volumes, valuation metrics and benchmarks",
    },
    AgentModel {
        id: "octagon-companies-agent",
        description: "Private company information, employee trends, competitors",
    },
    AgentModel {
        id: "octagon-funding-agent",
        description: "Private company funding rounds, investors and valuations",
    },
    AgentModel {
        id: "octagon-deals-agent",
        description: "M&A and IPO transactions for public and private companies",
    },
    AgentModel {
        id: "octagon-investors-agent",
        description: "Investor profiles, criteria and check sizes",
    },
    AgentModel {
        id: "octagon-debts-agent",
        description: "Private debt activities, borrowers and lenders",
    },
    AgentModel {
        id: "octagon-scraper-agent",
        description: "Structured data extraction from a specific webpage URL",
    },
    AgentModel {
        id: "octagon-deep-research-agent",
        description: "Broad research aggregated from multiple sources",
    },
];

/// Look up a known model by identifier.
#[must_use]
pub fn find(id: &str) -> Option<&'static AgentModel> {
    MODELS.iter().find(|m| m.id == id)
}

/// Instructions sent alongside the question for `model`.
#[must_use]
pub fn instructions_for(model: &str) -> &'static str {
    if model.contains("sec") {
        SEC_INSTRUCTIONS
    } else if model.contains("transcript") {
        TRANSCRIPT_INSTRUCTIONS
    } else {
        GENERIC_INSTRUCTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_known() {
        assert!(find(DEFAULT_MODEL).is_some());
        assert!(find("gpt-4o").is_none());
        assert_eq!(MODELS.len(), 11);
    }

    #[test]
    fn test_default_model_describes_sec_filings() {
        let described = find(DEFAULT_MODEL).map(|m| m.description);
        assert!(described.is_some_and(|d| d.contains("SEC filings")));
    }

    #[test]
    fn test_instructions_by_model() {
        assert_eq!(instructions_for("octagon-sec-agent"), SEC_INSTRUCTIONS);
        assert_eq!(
            instructions_for("octagon-transcripts-agent"),
            TRANSCRIPT_INSTRUCTIONS
        );
        assert_eq!(instructions_for("octagon-deals-agent"), GENERIC_INSTRUCTIONS);
    }
}
