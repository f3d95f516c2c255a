//! Provider instruction templates and the offline placeholder.

/// Display names for the languages that get a dedicated template.
fn display_name(language: &str) -> Option<&'static str> {
    match language {
        "python" => Some("Python"),
        "javascript" => Some("JavaScript"),
        "java" => Some("Java"),
        "cpp" => Some("C++"),
        _ => None,
    }
}

pub fn format_generation_prompt(task: &str, language: &str) -> String {
    match display_name(language) {
        Some(display) => {
            format!("Write {display} code for the following task:\n{task}\n\n{display} code:")
        }
        None => format!("Write {language} code:\n{task}"),
    }
}

pub fn format_explanation_prompt(code: &str, language: &str) -> String {
    format!("Explain this {language} code in simple terms:\n\n{code}")
}

/// Deterministic stand-in returned when the provider cannot be reached.
pub fn placeholder(prompt: &str) -> String {
    let quoted = prompt
        .lines()
        .map(|line| format!("# {line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Demo code (API not configured)\n\
         # Original prompt:\n\
         {quoted}\n\
         \n\
         def example_function():\n    \
         '''\n    \
         This is a demo placeholder.\n    \
         Configure your Hugging Face API token to get real AI-generated code.\n    \
         '''\n    \
         pass\n"
    )
}
