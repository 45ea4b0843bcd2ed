/// Slide a window of `size` tokens with stride 1 and join each window with a
/// space. Only full windows are emitted; there is no padding.
#[must_use]
pub fn collect_ngrams(tokens: &[String], size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    tokens.windows(size).map(|window| window.join(" ")).collect()
}
