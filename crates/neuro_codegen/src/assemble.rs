//! Output Assembler

/// 按顺序拼接各块，块之间空一行
pub fn assemble(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_are_separated_by_blank_line() {
        let blocks = vec![
            "type A = X | Y;".to_string(),
            "function f() {\n}".to_string(),
            "main();".to_string(),
        ];
        assert_eq!(
            assemble(&blocks),
            "type A = X | Y;\n\nfunction f() {\n}\n\nmain();"
        );
    }

    #[test]
    fn test_no_normalisation() {
        assert_eq!(assemble(&[]), "");
        assert_eq!(
            assemble(&["".to_string(), " x ".to_string()]),
            "\n\n x "
        );
    }
}
