//! Built-in note templates
//!
//! Inserted at the caret with Ctrl+1..3.

/// A named block of starter text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub body: &'static str,
}

const RECON: &str = "# Recon & Scoping
Target(s):\x20
Scope:
Out of scope:
Contacts:
Rules of engagement:

## Passive Recon
- WHOIS:
- DNS:
- ASN / IP ranges:

## Active Recon
- Port scan:
- Services / versions:
- Web tech:

## Risks & Constraints
- Rate limits:
- Time windows:
- Data handling:
";

const WEB_APP: &str = "# Web App Notes
URL:
Auth:
Roles:

## Endpoints
-

## Findings
- [ ] IDOR:\x20
- [ ] XSS:
- [ ] CSRF:
- [ ] SQLi:
- [ ] SSRF:
- [ ] RCE:

Proof:
Impact:
Remediation:
";

const ENGAGEMENT_SUMMARY: &str = "# Engagement Summary
Client:
Dates:
Team:

## High Risk
-

## Medium
-

## Low
-

Recommendations:
Next Steps:
";

/// All templates in menu order
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "Recon / Scoping",
        body: RECON,
    },
    Template {
        name: "Web App",
        body: WEB_APP,
    },
    Template {
        name: "Engagement Summary",
        body: ENGAGEMENT_SUMMARY,
    },
];

/// Look up a template by name
pub fn by_name(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Look up a template by menu position (0-based)
pub fn by_index(index: usize) -> Option<&'static Template> {
    TEMPLATES.get(index)
}
