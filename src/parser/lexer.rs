#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Word(String)
}

// Length in bytes of the word at the start of `text`. A word ends at
// whitespace, at `|` or where an arrow starts, so `A->b|c` needs no spaces
fn word_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(i, c)| c.is_whitespace() || c == '|' || text[i..].starts_with("->"))
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("->") {
            tokens.push(Token::Arrow);
            rest = &rest[2..];
        } else if c == '|' {
            tokens.push(Token::Or);
            rest = &rest[1..];
        } else if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else {
            let len = word_len(rest);
            tokens.push(Token::Word(rest[..len].to_string()));
            rest = &rest[len..];
        }
    }

    tokens
}
