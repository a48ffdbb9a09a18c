//! Tolerant doc comment parsing for four common dialects.
//!
//! Supported dialects: REST (`:param x:` / `:return:`), Epydoc
//! (`@param x:` / `@return:`), Google (`Args:` / `Returns:` sections),
//! and NumPy (underlined `Parameters` / `Returns` sections). Unsupported
//! or malformed text yields empty descriptions, never an error.

/// One `(parameter name, description)` pair pulled from a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParam {
    pub name: String,
    pub description: String,
}

/// The parsed pieces of a doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub summary: Option<String>,
    pub body: Option<String>,
    pub params: Vec<DocParam>,
    pub returns: Option<String>,
}

impl ParsedDoc {
    /// Summary and body joined as one description, if either is present.
    pub fn description(&self) -> Option<String> {
        match (&self.summary, &self.body) {
            (Some(summary), Some(body)) => Some(format!("{summary}\n\n{body}")),
            (Some(summary), None) => Some(summary.clone()),
            (None, Some(body)) => Some(body.clone()),
            (None, None) => None,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.description.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Rest,
    Epydoc,
    Google,
    Numpy,
}

pub fn parse_doc(text: &str) -> ParsedDoc {
    let lines = dedent(text);
    let marker = find_marker(&lines);

    let description_end = marker.map_or(lines.len(), |(index, _)| index);
    let (summary, body) = split_description(&lines[..description_end]);

    let mut doc = ParsedDoc {
        summary,
        body,
        params: Vec::new(),
        returns: None,
    };

    if let Some((index, dialect)) = marker {
        match dialect {
            Dialect::Rest => parse_tagged(&lines[index..], ':', &mut doc),
            Dialect::Epydoc => parse_tagged(&lines[index..], '@', &mut doc),
            Dialect::Google => parse_google(&lines[index..], &mut doc),
            Dialect::Numpy => parse_numpy(&lines[index..], &mut doc),
        }
    }

    doc
}

fn dedent(text: &str) -> Vec<String> {
    let raw: Vec<&str> = text.lines().collect();
    let indent = raw
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = raw
        .iter()
        .map(|line| {
            if line.len() >= indent {
                line[indent..].trim_end().to_string()
            } else {
                line.trim_end().to_string()
            }
        })
        .collect();

    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn find_marker(lines: &[String]) -> Option<(usize, Dialect)> {
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(":param")
            || trimmed.starts_with(":return")
            || trimmed.starts_with(":rtype")
            || trimmed.starts_with(":raises")
        {
            return Some((index, Dialect::Rest));
        }
        if trimmed.starts_with("@param")
            || trimmed.starts_with("@return")
            || trimmed.starts_with("@rtype")
            || trimmed.starts_with("@raise")
        {
            return Some((index, Dialect::Epydoc));
        }
        if is_google_header(trimmed) && line == trimmed {
            return Some((index, Dialect::Google));
        }
        if is_numpy_header(trimmed)
            && line == trimmed
            && lines.get(index + 1).is_some_and(|next| is_underline(next))
        {
            return Some((index, Dialect::Numpy));
        }
    }
    None
}

fn is_google_header(line: &str) -> bool {
    matches!(
        line,
        "Args:" | "Arguments:" | "Returns:" | "Yields:" | "Raises:"
    )
}

fn is_numpy_header(line: &str) -> bool {
    matches!(
        line,
        "Parameters" | "Returns" | "Yields" | "Raises" | "Other Parameters"
    )
}

fn is_underline(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch == '-' || ch == '=')
}

fn split_description(lines: &[String]) -> (Option<String>, Option<String>) {
    let mut trimmed: Vec<&str> = lines.iter().map(String::as_str).collect();
    while trimmed.last().is_some_and(|line| line.trim().is_empty()) {
        trimmed.pop();
    }
    if trimmed.is_empty() {
        return (None, None);
    }

    let split = trimmed
        .iter()
        .position(|line| line.trim().is_empty())
        .unwrap_or(trimmed.len());
    let summary = trimmed[..split].join(" ").trim().to_string();
    let body = trimmed
        .get(split + 1..)
        .map(|rest| rest.join("\n").trim().to_string())
        .filter(|body| !body.is_empty());

    (non_empty(summary), body)
}

/// Entry the trailing description lines currently attach to.
enum Attach {
    Param(usize),
    Returns,
    Skip,
}

fn parse_tagged(lines: &[String], sigil: char, doc: &mut ParsedDoc) {
    let mut attach = Attach::Skip;

    for line in lines {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(sigil) {
            let Some((tag_part, description)) = rest.split_once(':') else {
                attach = Attach::Skip;
                continue;
            };
            let mut tag_words = tag_part.split_whitespace();
            match tag_words.next() {
                Some("param") => {
                    // Allow an optional inline type: `:param int x: ...`.
                    match tag_words.last().and_then(clean_param_name) {
                        Some(name) => {
                            doc.params.push(DocParam {
                                name,
                                description: description.trim().to_string(),
                            });
                            attach = Attach::Param(doc.params.len() - 1);
                        }
                        None => attach = Attach::Skip,
                    }
                }
                Some("return" | "returns") => {
                    doc.returns = non_empty(description.trim().to_string());
                    attach = Attach::Returns;
                }
                _ => attach = Attach::Skip,
            }
        } else if !trimmed.is_empty() {
            append_to(doc, &attach, trimmed);
        }
    }
}

fn parse_google(lines: &[String], doc: &mut ParsedDoc) {
    #[derive(PartialEq)]
    enum Section {
        Params,
        Returns,
        Other,
    }

    let mut section = Section::Other;
    let mut attach = Attach::Skip;
    let mut returns_text = String::new();

    for line in lines {
        let trimmed = line.trim();
        if is_google_header(trimmed) && line.as_str() == trimmed {
            section = match trimmed {
                "Args:" | "Arguments:" => Section::Params,
                "Returns:" => Section::Returns,
                _ => Section::Other,
            };
            attach = Attach::Skip;
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        match section {
            Section::Params => {
                let entry = trimmed.split_once(':').and_then(|(left, right)| {
                    let name_part = left.split('(').next().unwrap_or(left);
                    clean_param_name(name_part).map(|name| (name, right.trim().to_string()))
                });
                match entry {
                    Some((name, description)) => {
                        doc.params.push(DocParam { name, description });
                        attach = Attach::Param(doc.params.len() - 1);
                    }
                    None => append_to(doc, &attach, trimmed),
                }
            }
            Section::Returns => {
                if !returns_text.is_empty() {
                    returns_text.push(' ');
                }
                returns_text.push_str(trimmed);
            }
            Section::Other => {}
        }
    }

    if !returns_text.is_empty() {
        doc.returns = non_empty(strip_leading_type(&returns_text));
    }
}

fn parse_numpy(lines: &[String], doc: &mut ParsedDoc) {
    #[derive(PartialEq)]
    enum Section {
        Params,
        Returns,
        Other,
    }

    let mut section = Section::Other;
    let mut attach = Attach::Skip;
    let mut returns_text = String::new();
    let mut index = 0;

    while index < lines.len() {
        let line = &lines[index];
        let trimmed = line.trim();

        if is_numpy_header(trimmed)
            && line.as_str() == trimmed
            && lines.get(index + 1).is_some_and(|next| is_underline(next))
        {
            section = match trimmed {
                "Parameters" | "Other Parameters" => Section::Params,
                "Returns" => Section::Returns,
                _ => Section::Other,
            };
            attach = Attach::Skip;
            index += 2;
            continue;
        }

        if trimmed.is_empty() {
            index += 1;
            continue;
        }

        let indented = line.starts_with(' ');
        match section {
            Section::Params => {
                if indented {
                    append_to(doc, &attach, trimmed);
                } else {
                    // Entry line: `name : type` or bare `name`.
                    let name_part = trimmed.split(':').next().unwrap_or(trimmed);
                    match clean_param_name(name_part) {
                        Some(name) => {
                            doc.params.push(DocParam {
                                name,
                                description: String::new(),
                            });
                            attach = Attach::Param(doc.params.len() - 1);
                        }
                        None => attach = Attach::Skip,
                    }
                }
            }
            Section::Returns => {
                // The unindented line names the type; indented lines
                // carry the description.
                if indented {
                    if !returns_text.is_empty() {
                        returns_text.push(' ');
                    }
                    returns_text.push_str(trimmed);
                }
            }
            Section::Other => {}
        }
        index += 1;
    }

    if !returns_text.is_empty() {
        doc.returns = non_empty(returns_text);
    }
}

fn append_to(doc: &mut ParsedDoc, attach: &Attach, text: &str) {
    match attach {
        Attach::Param(index) => {
            if let Some(param) = doc.params.get_mut(*index) {
                if !param.description.is_empty() {
                    param.description.push(' ');
                }
                param.description.push_str(text);
            }
        }
        Attach::Returns => match &mut doc.returns {
            Some(returns) => {
                returns.push(' ');
                returns.push_str(text);
            }
            None => doc.returns = Some(text.to_string()),
        },
        Attach::Skip => {}
    }
}

fn clean_param_name(raw: &str) -> Option<String> {
    let name = raw.trim().trim_start_matches('*').trim();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    valid.then(|| name.to_string())
}

fn strip_leading_type(text: &str) -> String {
    if let Some((left, right)) = text.split_once(':')
        && !left.trim().is_empty()
        && left.trim().split_whitespace().count() == 1
    {
        return right.trim().to_string();
    }
    text.trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_dialect_parses_params_and_return() {
        let doc = parse_doc(
            "
            Returns the sum of two numbers.

            :param x: The first number
            :param y: The second number
                spanning two lines
            :return: The sum of the two numbers
            ",
        );

        assert_eq!(doc.summary.as_deref(), Some("Returns the sum of two numbers."));
        assert_eq!(doc.param("x"), Some("The first number"));
        assert_eq!(
            doc.param("y"),
            Some("The second number spanning two lines")
        );
        assert_eq!(doc.returns.as_deref(), Some("The sum of the two numbers"));
    }

    #[test]
    fn rest_dialect_tolerates_inline_types() {
        let doc = parse_doc(":param int x: The first number");
        assert_eq!(doc.param("x"), Some("The first number"));
    }

    #[test]
    fn epydoc_dialect_parses_params_and_return() {
        let doc = parse_doc(
            "
            Greets someone.

            @param name: Who to greet
            @return: The greeting
            ",
        );

        assert_eq!(doc.param("name"), Some("Who to greet"));
        assert_eq!(doc.returns.as_deref(), Some("The greeting"));
    }

    #[test]
    fn google_dialect_parses_sections() {
        let doc = parse_doc(
            "
            Divides two numbers.

            Args:
                a (float): The dividend
                b: The divisor,
                    never zero
            Returns:
                float: The quotient
            ",
        );

        assert_eq!(doc.summary.as_deref(), Some("Divides two numbers."));
        assert_eq!(doc.param("a"), Some("The dividend"));
        assert_eq!(doc.param("b"), Some("The divisor, never zero"));
        assert_eq!(doc.returns.as_deref(), Some("The quotient"));
    }

    #[test]
    fn numpy_dialect_parses_sections() {
        let doc = parse_doc(
            "
            Scales a vector.

            Parameters
            ----------
            vector : list of float
                The vector to scale
            factor : float
                The scale factor

            Returns
            -------
            list of float
                The scaled vector
            ",
        );

        assert_eq!(doc.param("vector"), Some("The vector to scale"));
        assert_eq!(doc.param("factor"), Some("The scale factor"));
        assert_eq!(doc.returns.as_deref(), Some("The scaled vector"));
    }

    #[test]
    fn multi_paragraph_description_splits_summary_and_body() {
        let doc = parse_doc(
            "
            First line of summary
            still the summary.

            The body paragraph with more detail.

            :param x: ignored here
            ",
        );

        assert_eq!(
            doc.summary.as_deref(),
            Some("First line of summary still the summary.")
        );
        assert_eq!(
            doc.body.as_deref(),
            Some("The body paragraph with more detail.")
        );
        assert_eq!(
            doc.description().as_deref(),
            Some("First line of summary still the summary.\n\nThe body paragraph with more detail.")
        );
    }

    #[test]
    fn malformed_text_yields_empty_pieces_without_error() {
        let doc = parse_doc(":param : no name\n@weird stuff\nArgs:");
        assert!(doc.params.is_empty());
        assert!(doc.returns.is_none());

        let empty = parse_doc("");
        assert_eq!(empty, ParsedDoc::default());
    }
}
