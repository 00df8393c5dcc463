use scout::search::tokenize;
use scout::test_utils::{TestCase, run_table_tests};

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

#[test]
fn tokenizer_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "lowercases and splits on punctuation",
            input: "Crypto-Trading, DeFi!",
            expected: owned(&["crypto", "trading", "defi"]),
        },
        TestCase {
            name: "drops short tokens",
            input: "an AI bot for me",
            expected: owned(&["bot", "for"]),
        },
        TestCase {
            name: "keeps digits",
            input: "web3 gpt4o v2",
            expected: owned(&["web3", "gpt4o"]),
        },
        TestCase {
            name: "whitespace only",
            input: "   \t\n ",
            expected: owned(&[]),
        },
        TestCase {
            name: "keeps duplicates in order",
            input: "data DATA data",
            expected: owned(&["data", "data", "data"]),
        },
    ];

    run_table_tests(cases, tokenize)
}
