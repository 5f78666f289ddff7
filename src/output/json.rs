use serde::Serialize;

use super::{Formatter, ResponseSummary, iso8601_timestamp};
use crate::beamforming::{BearingPoint, BearingResponse};

pub struct JsonFormatter;

#[derive(Serialize)]
struct ResponseDocument<'a> {
    generated_at: String,
    summary: ResponseSummary,
    points: &'a [BearingPoint],
}

impl Formatter for JsonFormatter {
    fn format(&self, response: &BearingResponse) -> String {
        let document = ResponseDocument {
            generated_at: iso8601_timestamp(),
            summary: ResponseSummary::from_response(response),
            points: response.points(),
        };
        serde_json::to_string_pretty(&document)
            .unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
