//! Per-destination rendering of the responder's canonical reply.

use roombot_core::types::Response;
use serde::Serialize;

pub fn plain_text(response: &Response) -> String {
    match &response.attachment {
        Some(attachment) => format!("{} {}", response.text, attachment.image_url),
        None => response.text.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct SlackMessage {
    pub response_type: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Serialize)]
pub struct SlackAttachment {
    pub title: String,
    pub image_url: String,
}

pub fn slack_message(response: &Response) -> SlackMessage {
    SlackMessage {
        response_type: "in_channel",
        text: response.text.clone(),
        attachments: response
            .attachment
            .iter()
            .map(|a| SlackAttachment {
                title: a.title.clone(),
                image_url: a.image_url.clone(),
            })
            .collect(),
    }
}
