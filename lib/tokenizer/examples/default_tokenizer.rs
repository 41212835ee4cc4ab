//! Counts tokens for a parallel English / Icelandic sentence with the encoding pinned for
//! GPT-4o.
//!
//! > As a rule of thumb, OpenAI suggest that 100 tokens equal 75 words of English. Icelandic
//! > does a lot worse.
use tokenizer::{DefaultTokenizer, TokenCounter};

fn main() -> Result<(), tokenizer::Error> {
    let tokenizer = DefaultTokenizer::for_model("gpt-4o")?;

    let english = "The committee will meet again next Tuesday to discuss the budget.";
    let icelandic =
        "Nefndin mun hittast aftur næsta þriðjudag til að ræða fjárhagsáætlunina.";

    for (language, text) in [("English", english), ("Icelandic", icelandic)] {
        println!("{language}: {text}");
        println!("  Words: {}", text.split_whitespace().count());
        println!("  Tokens: {}", tokenizer.count_tokens(text));
    }

    println!("Encoding: {}", tokenizer.encoding());

    Ok(())
}
