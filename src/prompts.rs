//! Instruction templates sent to the language model, and parsing of its replies.

/// Build the translation instruction.
///
/// Single words get a dictionary-style prompt asking for the most common
/// equivalent; anything containing a space is translated as running text.
pub fn translation_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    if text.contains(' ') {
        format!(
            "Translate the following text from {source_lang} to {target_lang}. \
             Keep the meaning, tone and formatting of the original. \
             Respond with only the translated text, without quotes, notes or explanations.\n\n\
             {text}"
        )
    } else {
        format!(
            "Translate the single {source_lang} word \"{text}\" into {target_lang}. \
             Respond with only the most common {target_lang} equivalent, \
             without quotes, alternatives or explanations."
        )
    }
}

pub fn suggestion_prompt(text: &str, language: &str) -> String {
    format!(
        "Suggest exactly three short, natural-sounding replies in {language} \
         to the following message: \"{text}\". \
         Write each reply on its own line, with no numbering, bullets or extra commentary."
    )
}

/// Split model output into reply suggestions, one per non-blank line.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
