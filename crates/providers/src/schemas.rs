//! Response schema for structured company reports
//!
//! Gemini's `responseSchema` uses an OpenAPI subset with upper-case type
//! names. Property names follow the camelCase JSON that
//! [`radar_core::CompanyReport`] deserializes from.

use serde_json::{Value, json};

fn sources_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": "Sources backing this information.",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "Site name or article title" },
                "url": { "type": "STRING", "description": "Verifiable URL starting with http" }
            }
        }
    })
}

/// Schema the report call constrains its JSON reply to
pub fn company_report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "companyName": { "type": "STRING", "description": "Official company name" },
            "basicInfo": {
                "type": "OBJECT",
                "properties": {
                    "overview": {
                        "type": "STRING",
                        "description": "Business overview. Mark the core development with **[Key Update] text**."
                    },
                    "foundingDate": { "type": "STRING", "description": "Founding year" },
                    "headquarters": { "type": "STRING", "description": "Headquarters location" },
                    "industry": { "type": "STRING", "description": "Primary industry" },
                    "fundingStatus": { "type": "STRING", "description": "Latest funding or listing status" },
                    "sources": sources_schema()
                },
                "required": ["overview", "industry"]
            },
            "keyPeople": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "role": { "type": "STRING" },
                        "department": { "type": "STRING" },
                        "sources": sources_schema()
                    }
                }
            },
            "opportunities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["tender", "hiring", "consulting"] },
                        "description": {
                            "type": "STRING",
                            "description": "Opportunity description. Mark the core need with **[Opportunity] text**."
                        },
                        "interventionStrategy": {
                            "type": "STRING",
                            "description": "Concrete way in, based on this specific opportunity."
                        },
                        "sources": sources_schema()
                    },
                    "required": ["title", "description", "interventionStrategy"]
                }
            },
            "risks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "severity": { "type": "STRING", "enum": ["low", "medium", "high"] },
                        "category": { "type": "STRING" },
                        "description": {
                            "type": "STRING",
                            "description": "Risk description. Mark the core risk with **[Risk Alert] text**."
                        },
                        "sources": sources_schema()
                    }
                }
            },
            "salesStrategy": {
                "type": "STRING",
                "description": "Targeted approach. Mark the core plan with **[Sales Strategy] text**."
            }
        },
        "required": ["companyName", "basicInfo", "salesStrategy"]
    })
}
