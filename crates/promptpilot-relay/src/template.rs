//! The fixed instruction template wrapped around every submitted prompt
//!
//! The system message carries a prompt-engineering guide; the user message
//! embeds the submitted prompt and pins the output to two numbered variants
//! so the client can split the final text into discrete entries.

use crate::protocol::{ChatMessage, CompletionRequest};

/// Sampling temperature
const TEMPERATURE: f64 = 0.7;
/// Nucleus sampling threshold
const TOP_P: f64 = 1.0;
/// Frequency penalty
const FREQUENCY_PENALTY: f64 = 0.0;
/// Presence penalty
const PRESENCE_PENALTY: f64 = 0.0;
/// Maximum tokens to generate
const MAX_TOKENS: u32 = 2000;
/// Number of optimized variants the template requests
pub const VARIANT_COUNT: u32 = 2;

/// System instruction: optimize the given prompt according to the guide
const SYSTEM_INSTRUCTION: &str = r#"You optimize prompts. According to the following guide about how to write better prompts, rewrite the prompt you are given into improved versions. Follow the guide strictly and keep the user's intent unchanged.

--------------------------------
### 2. Put instructions at the beginning of the prompt and use ### or """ to separate the instruction and context

Less effective ❌:

Summarize the text below as a bullet point list of the most important points.

{text input here}
"""

Better ✅:

Summarize the text below as a bullet point list of the most important points.

Text: """
{text input here}
"""

### 3. Be specific, descriptive and as detailed as possible about the desired context, outcome, length, format, style, etc

Less effective ❌:

Write a poem about OpenAI.

Better ✅:

Write a short inspiring poem about OpenAI, focusing on the recent DALL-E product launch (DALL-E is a text to image ML model) in the style of a {famous poet}

### 4. Articulate the desired output format through examples (example 1, example 2)

Less effective ❌:

Extract the entities mentioned in the text below. Extract the following 4 entity types: company names, people names, specific topics and themes.

Text: {text}

Show, and tell - the models respond better when shown specific format requirements. This also makes it easier to programmatically parse out multiple outputs reliably.

Better ✅:

Extract the important entities mentioned in the text below. First extract all company names, then extract all people names, then extract specific topics which fit the content and finally extract general overarching themes

Desired format:
Company names: <comma_separated_list_of_company_names>
People names: -||-
Specific topics: -||-
General themes: -||-

Text: {text}

### 5. Start with zero-shot, then few-shot (example); if neither of them worked, then fine-tune

✅ Zero-shot

Extract keywords from the below text.

Text: {text}

Keywords:

✅ Few-shot - provide a couple of examples

Extract keywords from the corresponding texts below.

Text 1: Stripe provides APIs that web developers can use to integrate payment processing into their websites and mobile applications.
Keywords 1: Stripe, payment processing, APIs, web developers, websites, mobile applications
##
Text 2: OpenAI has trained cutting-edge language models that are very good at understanding and generating text. Our API provides access to these models and can be used to solve virtually any task that involves processing language.
Keywords 2: OpenAI, language models, text processing, API.
##
Text 3: {text}
Keywords 3:

✅ Fine-tune: see fine-tune best practices.

### 6. Reduce "fluffy" and imprecise descriptions

Less effective ❌:

The description for this product should be fairly short, a few sentences only, and not too much more.

Better ✅:

Use a 3 to 5 sentence paragraph to describe this product.

### 7. Instead of just saying what not to do, say what to do instead

Less effective ❌:

The following is a conversation between an Agent and a Customer. DO NOT ASK USERNAME OR PASSWORD. DO NOT REPEAT.

Customer: I can't log in to my account.
Agent:

Better ✅:

The following is a conversation between an Agent and a Customer. The agent will attempt to diagnose the problem and suggest a solution, whilst refraining from asking any questions related to PII. Instead of asking for PII, such as username or password, refer the user to the help article www.samplewebsite.com/help/faq

Customer: I can't log in to my account.
Agent:

### 8. Code generation specific - use "leading words" to nudge the model toward a particular pattern

Less effective ❌:

# Write a simple python function that
# 1. Ask me for a number in mile
# 2. It converts miles to kilometers

Adding "import" hints to the model that it should start writing in Python. (Similarly "SELECT" is a good hint for the start of a SQL statement.)

Better ✅:

# Write a simple python function that
# 1. Ask me for a number in mile
# 2. It converts miles to kilometers

import
--------------------------------
"#;

/// Build the user message embedding the submitted prompt
fn user_message(prompt: &str) -> String {
    format!(
        r#"Original prompt: """
{prompt}
"""

Generate {VARIANT_COUNT} optimized versions of the original prompt.

Desired format:

1. <first optimized prompt>

2. <second optimized prompt>
"#
    )
}

/// Construct the completion request payload for a submitted prompt
///
/// All generation parameters are constants; only the model identifier and
/// the embedded prompt vary.
pub fn build_payload(model: &str, prompt: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_owned(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(user_message(prompt)),
        ],
        temperature: TEMPERATURE,
        top_p: TOP_P,
        frequency_penalty: FREQUENCY_PENALTY,
        presence_penalty: PRESENCE_PENALTY,
        max_tokens: MAX_TOKENS,
        stream: true,
        n: 1,
    }
}
