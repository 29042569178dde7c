/// History key for a user-supplied word: trimmed and lowercased. `None` when
/// nothing is left.
pub fn normalize_word(input: &str) -> Option<String> {
    let word = input.trim().to_lowercase();

    (!word.is_empty()).then_some(word)
}
