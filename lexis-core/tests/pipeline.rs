use lexis_core::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

fn rows(table: &FrequencyTable) -> Vec<(&str, Count)> {
    table.iter().map(|e| (e.word.as_str(), e.count)).collect()
}

const CAT_TEXT: &str = "The cat sat. The cat ran!";

#[test]
fn cat_text_without_stopwords() {
    let tokens = tokenize(CAT_TEXT, TokenMode::WordChars);
    assert_eq!(tokens, ["the", "cat", "sat", "the", "cat", "ran"].map(Token::from));

    let table = aggregate(&tokens);
    assert_eq!(rows(&table), [("cat", 2), ("the", 2), ("ran", 1), ("sat", 1)]);

    assert_eq!(count_sentences(CAT_TEXT), 2);
}

#[test]
fn cat_text_with_stopwords() {
    let tokens = filter(
        tokenize(CAT_TEXT, TokenMode::WordChars),
        &StopwordSet::parse("the"),
    );
    assert_eq!(tokens, ["cat", "sat", "cat", "ran"].map(Token::from));
    assert_eq!(rows(&aggregate(&tokens)), [("cat", 2), ("ran", 1), ("sat", 1)]);
}

#[test]
fn hundred_tokens_twenty_five_types() {
    // 25 types, 4 occurrences each
    let text: String = (0..100)
        .map(|i| format!("word{} ", (b'a' + (i % 25) as u8) as char))
        .collect();

    let table = aggregate(&tokenize(&text, TokenMode::WordChars));
    assert_eq!(table.total(), 100);
    assert_eq!(table.distinct(), 25);

    let s = lexical_summary(&table).unwrap();
    assert!(close(s.ttr, 0.25));
    assert!(close(s.root_ttr, 2.5));
    assert!(close(s.cttr, 1.7678));
    assert!(close(s.log_ttr.unwrap(), 0.6990));
}

#[test]
fn single_token_summary() {
    let table = aggregate(&tokenize("Hello.", TokenMode::AlphabeticWithApostrophe));
    let s = lexical_summary(&table).unwrap();
    assert_eq!((s.tokens, s.types), (1, 1));
    assert_eq!(s.ttr, 1.0);
    assert_eq!(s.root_ttr, 1.0);
    assert!(close(s.cttr, 0.7071));
    assert!(s.log_ttr.is_none());
}

#[test]
fn min_count_then_top_n() {
    let table = FrequencyTable::from_tokens("a a a a a b b b c c d".split(' '));
    assert_eq!(rows(&table), [("a", 5), ("b", 3), ("c", 2), ("d", 1)]);

    let kept = table.filtered(&TableFilter {
        top_n: 2,
        min_count: 2,
        order: FilterOrder::MinCountFirst,
    });
    assert_eq!(rows(&kept), [("a", 5), ("b", 3)]);
}

#[test]
fn empty_input_is_a_state_not_an_error() {
    assert!(tokenize("", TokenMode::WordChars).is_empty());
    assert!(aggregate::<Token>(&[]).is_empty());
    assert!(lexical_summary(&FrequencyTable::default()).is_none());

    let analysis = Analyzer::default().analyze("", &StopwordSet::empty());
    assert_eq!(analysis, Analysis::NoTokens(EmptyStage::Tokenizer));
}

#[test]
fn pipeline_is_deterministic() {
    let text = "Zebras and apples, apples and zebras; mangoes! Kiwis? kiwis... and more.";
    let analyzer = Analyzer::new(AnalysisConfig::lexical_diversity());
    let stopwords = StopwordSet::parse("and, more");

    let first = analyzer.analyze(text, &stopwords);
    for _ in 0..10 {
        assert_eq!(analyzer.analyze(text, &stopwords), first);
    }
}

#[test]
fn analyzer_matches_composed_stages() {
    let text = "It's the teacher's job; it's not the student's job.";
    let stopwords = StopwordSet::parse("the, not");
    let cfg = AnalysisConfig::lexical_diversity();

    let composed = aggregate(&filter(tokenize(text, cfg.mode), &stopwords));
    let report = Analyzer::new(cfg)
        .analyze(text, &stopwords)
        .into_report()
        .unwrap();

    assert_eq!(report.table, composed);
    assert_eq!(report.raw_tokens, 9);
    assert_eq!(report.filtered_tokens, composed.total());
    assert_eq!(report.table.get("it's"), Some(2));
}

#[test]
fn sum_and_order_invariants_hold() {
    let text = "one two three two three three four four four four five";
    let tokens = tokenize(text, TokenMode::WordChars);
    let table = aggregate(&tokens);

    assert_eq!(table.total(), tokens.len());
    for pair in table.entries().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.count > b.count || (a.count == b.count && a.word <= b.word));
    }
}

#[test]
fn word_frequency_preset_truncates_to_200() {
    let text: String = (0..300).map(|i| format!("w{i} ")).collect();
    let report = Analyzer::new(AnalysisConfig::word_frequency())
        .analyze(&text, &StopwordSet::empty())
        .into_report()
        .unwrap();

    assert_eq!(report.table.len(), 200);
    assert_eq!(report.filtered_tokens, 300);
    assert_eq!(report.summary.tokens, 200);
}
