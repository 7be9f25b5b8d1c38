//! O(n) Performance Verification Tests for TokenStream

use super::tokenize::TokenStream;
use crate::config::Meta;

// The step counter is incremented once per scan iteration in
// TokenStream::next (test builds only, thread-local).

fn with_step_counter<F: FnOnce()>(f: F) -> usize {
    use crate::template::engine::tokenize::test_counter;
    test_counter::reset();
    f();
    test_counter::get()
}

fn count_steps(text: &str) -> usize {
    let meta = Meta::default();
    with_step_counter(|| {
        let mut stream = TokenStream::new(text, &meta);
        while stream.next().is_some() {}
    })
}

fn steps_per_byte(steps: usize, input_len: usize) -> f64 {
    steps as f64 / input_len as f64
}

#[test]
fn test_tokenstream_o_n_performance() {
    let texts: Vec<String> = [100, 1000, 10000]
        .iter()
        .map(|&n| (0..n).map(|i| format!("{{token{}}} ", i)).collect())
        .collect();

    let spbs: Vec<f64> = texts
        .iter()
        .map(|text| steps_per_byte(count_steps(text), text.len()))
        .collect();

    // Steps-per-byte should be constant for an O(n) scan
    let avg_spb = spbs.iter().sum::<f64>() / spbs.len() as f64;
    let tolerance = avg_spb * 0.2;
    for spb in &spbs {
        assert!(
            (spb - avg_spb).abs() <= tolerance,
            "Steps-per-byte variance too high: {:.3} vs avg {:.3}",
            spb,
            avg_spb
        );
    }

    for text in &texts {
        let steps = count_steps(text);
        assert!(
            steps <= text.len(),
            "Steps {} exceeded input length {}",
            steps,
            text.len()
        );
    }
}

#[test]
fn test_tokenstream_worst_case_unclosed_left_metachars() {
    // Many `{` with no `}` on the same line
    let text = "{ ".repeat(1000) + "\n" + &"{ ".repeat(1000);
    let steps = count_steps(&text);
    assert!(steps <= 10, "Unclosed metachars took {} steps", steps);
}

#[test]
fn test_tokenstream_worst_case_unclosed_per_line() {
    let text = "{ abc\n".repeat(2000);
    let spb = steps_per_byte(count_steps(&text), text.len());
    assert!(spb <= 1.0, "Steps-per-byte {} exceeded 1.0", spb);
}

#[test]
fn test_tokenstream_worst_case_sparse_tokens() {
    let text = (0..100)
        .map(|i| format!("{} {{token{}}}", "x".repeat(100), i))
        .collect::<String>();
    let spb = steps_per_byte(count_steps(&text), text.len());
    assert!(spb <= 1.0, "Steps-per-byte {} exceeded 1.0", spb);
}

#[test]
fn test_tokenstream_worst_case_close_before_open() {
    let text = "} ".repeat(500) + &"{ ".repeat(500) + &"}".repeat(500);
    let steps = count_steps(&text);
    assert!(
        steps <= text.len(),
        "Steps {} exceeded input length {}",
        steps,
        text.len()
    );
}

fn count_scanned_bytes(text: &str) -> usize {
    use crate::template::engine::tokenize::test_counter;
    let meta = Meta::default();
    test_counter::reset();
    let mut stream = TokenStream::new(text, &meta);
    while stream.next().is_some() {}
    test_counter::scanned_bytes()
}

#[test]
fn test_tokenstream_long_line_of_directives_scans_linearly() {
    for n in [1_000, 10_000, 40_000] {
        let text = "{.space}".repeat(n);
        let scanned = count_scanned_bytes(&text);
        assert!(
            scanned <= 3 * text.len(),
            "scanned {} bytes for a {} byte line",
            scanned,
            text.len()
        );
    }
}

#[test]
fn test_tokenstream_unclosed_lines_before_distant_close() {
    // Every line opens, the only close is at the very end
    for n in [1_000, 10_000] {
        let text = "{ abc\n".repeat(n) + "}";
        let scanned = count_scanned_bytes(&text);
        assert!(
            scanned <= 3 * text.len(),
            "scanned {} bytes for {} bytes of input",
            scanned,
            text.len()
        );
        let meta = Meta::default();
        let tokens: Vec<_> = TokenStream::new(&text, &meta).collect();
        assert_eq!(tokens.len(), 1, "no directive spans lines");
    }
}
