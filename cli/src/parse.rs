//! The line-oriented input format: one node per line, each a whitespace-separated
//! list of `#<k>` tokens naming an operand by how many lines above it was defined.

use graph::{Graph, OpCode};

use crate::error::InputError;

pub fn parse(text: &str) -> Result<Graph, InputError> {
    let mut graph = Graph::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut offsets = Vec::new();
        for token in line.split_whitespace() {
            let rest = token.strip_prefix('#').ok_or_else(|| InputError::MalformedToken {
                line: line_no,
                token: token.to_owned(),
            })?;
            let offset: usize = rest.parse().map_err(|_| InputError::MalformedToken {
                line: line_no,
                token: token.to_owned(),
            })?;
            offsets.push(offset);
        }
        graph.append_node(OpCode::Original(line_no as u32), &offsets)?;
    }
    Ok(graph)
}
