pub const MASK_CHAR: char = '*';

/// Render the masked progress string for a target word.
///
/// Each position shows the true letter when it has been guessed, and
/// `MASK_CHAR` otherwise. The output always has the same character count
/// as the target word, and only set membership of `guessed_letters`
/// matters, not its order.
pub fn render_progress(target_word: &str, guessed_letters: &[char]) -> String {
    target_word
        .chars()
        .map(|c| {
            if guessed_letters.contains(&c) {
                c
            } else {
                MASK_CHAR
            }
        })
        .collect()
}
