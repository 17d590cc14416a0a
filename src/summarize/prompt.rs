use crate::summarize::llm::{ChatMessage, ChatRequest};

/// Output contract given to the model. The pipeline does not check the reply against it.
pub const SYSTEM_PROMPT: &str = "You create labeled chapters for YouTube videos about Programming \
from the YouTube channel. The host of the show is dev and should be referenced by name when needed. \
The transcript you will be given has a timestamp on one line and the next line is the corresponding \
text for that timestamp. This repeats for the whole transcript. The output should be each timestamp \
and chapter title on a newline. Each chapter title should be no longer than 50 characters. The chapter \
titles can be keywords, summarized concepts, or titles. Only create a new chapter when the topic changes \
significantly. At least 2 minutes should have elapsed before specifying a new chapter. Only use the \
timestamps specified in the transcript. The chapter timestamps should not be greater than the largest \
timestamp in the transcript. The output for each line should look like: 00:00:00 Title";

const USER_PREFIX: &str = "Summarize the following transcript:\n";

/// Build the two-message chapter request for a transcript.
pub fn build_request(model: &str, transcript_text: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!("{}{}", USER_PREFIX, transcript_text)),
        ],
    }
}
