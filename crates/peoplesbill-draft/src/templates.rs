//! The clause template table.
//!
//! Templates are checked in table order; the first whose key and the
//! cluster theme contain one another (case-insensitive) is used.

use std::borrow::Cow;

/// One named legal-clause template. `body` may carry placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub rationale: &'static str,
}

pub const TIMEFRAME: &str = "{timeframe}";
pub const FREQUENCY: &str = "{frequency}";
pub const YEARS: &str = "{years}";
pub const PRISON_TERM: &str = "{prison_term}";
pub const PERCENTAGE: &str = "{percentage}";

pub const CLAUSE_TEMPLATES: &[ClauseTemplate] = &[
    ClauseTemplate {
        key: "Asset Declaration",
        title: "Asset Declaration Requirements",
        body: "Every public officer shall, within {timeframe} of assumption of office and \
               {frequency} thereafter, submit to the Office of the Special Prosecutor a \
               comprehensive declaration of assets, liabilities, and business interests, \
               including those of their spouse and children under eighteen years of age.",
        rationale: "Ensures transparency and accountability in public service",
    },
    ClauseTemplate {
        key: "Unexplained Wealth",
        title: "Presumption of Unexplained Wealth",
        body: "Where the Office of the Special Prosecutor has reasonable grounds to believe \
               that a public officer owns property or has pecuniary resources \
               disproportionate to their known sources of income, the burden of proof shall \
               shift to the officer to demonstrate that such assets were lawfully acquired.",
        rationale: "Implements reverse burden of proof for unexplained wealth",
    },
    ClauseTemplate {
        key: "Investigation Process",
        title: "Investigation Procedures",
        body: "Upon receipt of credible information or citizen petition regarding unexplained \
               wealth, the Office of the Special Prosecutor shall, within {timeframe}, commence \
               preliminary investigations and notify the concerned public officer in writing \
               of the nature of the inquiry.",
        rationale: "Establishes clear investigation procedures",
    },
    ClauseTemplate {
        key: "Asset Confiscation",
        title: "Confiscation of Unexplained Assets",
        body: "Where a public officer fails to satisfactorily explain the lawful origin of \
               assets deemed disproportionate to their income, the High Court shall, upon \
               application by the Office of the Special Prosecutor, order the confiscation of \
               such assets to the State.",
        rationale: "Provides for recovery of illicitly acquired assets",
    },
    ClauseTemplate {
        key: "Fair Hearing Rights",
        title: "Right to Fair Hearing",
        body: "Every person subject to investigation under this Act shall have the right to: \
               (a) receive written notice of the investigation; (b) legal representation of \
               their choice; (c) present evidence in their defense; (d) cross-examine \
               witnesses; and (e) appeal any adverse determination to a higher court.",
        rationale: "Protects constitutional rights during investigations",
    },
    ClauseTemplate {
        key: "Penalties and Sanctions",
        title: "Penalties for Violation",
        body: "Any public officer found guilty of possessing unexplained wealth shall be: \
               (a) liable to a fine not exceeding three times the value of the unexplained \
               assets; (b) disqualified from holding public office for a period not less than \
               {years} years; and (c) subject to imprisonment for a term not exceeding \
               {prison_term} years.",
        rationale: "Establishes deterrent penalties",
    },
    ClauseTemplate {
        key: "Whistleblower Protection",
        title: "Protection of Whistleblowers",
        body: "Any person who, in good faith, provides information leading to the discovery \
               of unexplained wealth shall be: (a) protected from victimization, \
               discrimination, or retaliatory action; (b) entitled to witness protection where \
               necessary; and (c) eligible for a reward not exceeding {percentage}% of \
               recovered assets.",
        rationale: "Encourages reporting of corruption",
    },
];

/// A template resolved for one theme: either a table entry or the generic
/// provision built around the theme itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub title: Cow<'static, str>,
    pub body: Cow<'static, str>,
    pub rationale: Cow<'static, str>,
}

impl From<&'static ClauseTemplate> for ResolvedTemplate {
    fn from(t: &'static ClauseTemplate) -> Self {
        Self {
            title: Cow::Borrowed(t.title),
            body: Cow::Borrowed(t.body),
            rationale: Cow::Borrowed(t.rationale),
        }
    }
}

/// First table template matching `theme`, if any.
pub fn find_template(theme: &str) -> Option<&'static ClauseTemplate> {
    let theme = theme.to_lowercase();
    CLAUSE_TEMPLATES.iter().find(|t| {
        let key = t.key.to_lowercase();
        theme.contains(&key) || key.contains(&theme)
    })
}

/// Template for `theme`, falling back to a generic provision.
pub fn resolve(theme: &str) -> ResolvedTemplate {
    match find_template(theme) {
        Some(t) => t.into(),
        None => generic(theme),
    }
}

fn generic(theme: &str) -> ResolvedTemplate {
    let lower = theme.to_lowercase();
    ResolvedTemplate {
        title: Cow::Owned(format!("Provision for {theme}")),
        body: Cow::Owned(format!(
            "The Office of the Special Prosecutor shall have the power to implement measures \
             regarding {lower} as determined necessary for the effective administration of \
             this Act."
        )),
        rationale: Cow::Owned(format!("Addresses citizen concerns about {lower}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_and_keys() {
        let keys: Vec<&str> = CLAUSE_TEMPLATES.iter().map(|t| t.key).collect();
        assert_eq!(
            keys,
            [
                "Asset Declaration",
                "Unexplained Wealth",
                "Investigation Process",
                "Asset Confiscation",
                "Fair Hearing Rights",
                "Penalties and Sanctions",
                "Whistleblower Protection",
            ]
        );
    }

    #[test]
    fn matches_in_either_direction() {
        assert_eq!(find_template("asset declaration").map(|t| t.key), Some("Asset Declaration"));
        assert_eq!(
            find_template("Unexplained Wealth Cases").map(|t| t.key),
            Some("Unexplained Wealth")
        );
        // Theme contained in key.
        assert_eq!(find_template("Whistleblower").map(|t| t.key), Some("Whistleblower Protection"));
        // "Asset" is in both Asset Declaration and Asset Confiscation; table order wins.
        assert_eq!(find_template("asset").map(|t| t.key), Some("Asset Declaration"));
    }

    #[test]
    fn unmatched_theme_gets_generic_provision() {
        assert!(find_template("Roads-Related Submissions").is_none());
        let t = resolve("Roads-Related Submissions");
        assert_eq!(t.title, "Provision for Roads-Related Submissions");
        assert!(t.body.contains("regarding roads-related submissions as determined"));
        assert_eq!(t.rationale, "Addresses citizen concerns about roads-related submissions");
    }

    #[test]
    fn placeholders_present_where_expected() {
        let body = |key: &str| CLAUSE_TEMPLATES.iter().find(|t| t.key == key).map(|t| t.body);
        let asset = body("Asset Declaration").unwrap();
        assert!(asset.contains(TIMEFRAME) && asset.contains(FREQUENCY));
        let penalties = body("Penalties and Sanctions").unwrap();
        assert!(penalties.contains(YEARS) && penalties.contains(PRISON_TERM));
        assert!(body("Whistleblower Protection").unwrap().contains(PERCENTAGE));
    }
}
