//! Record to command encoding.

use crate::codec::record::{Coercion, Record};
use crate::wire::Command;

/// Encode `record` as a command addressed to `path`.
///
/// Fields are emitted in declaration order as `=<wire>=<text>`. A
/// non-boolean field holding its zero value is left out so the device
/// keeps its own default; booleans are always sent, since `no` is a
/// meaningful instruction.
pub fn marshal<R: Record>(path: &str, record: &R) -> Command {
    let mut command = Command::new(path);
    for (index, field) in R::FIELDS.iter().enumerate() {
        let Some(value) = record.get(index) else {
            continue;
        };
        if field.coercion != Coercion::Bool && value.is_zero() {
            continue;
        }
        command.push_attr(field.wire_name, value.encode());
    }
    command
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Default, crate::Record)]
    struct Rule {
        #[record(name = ".id")]
        id: String,
        #[record(name = "chain")]
        chain: String,
        #[record(name = "dst-port")]
        dst_port: u16,
        #[record(name = "disabled")]
        disabled: bool,
        #[record(name = "interval", duration)]
        interval: i64,
    }

    #[test]
    fn path_comes_first_then_declaration_order() {
        let rule = Rule {
            id: "*1".into(),
            chain: "input".into(),
            dst_port: 22,
            disabled: true,
            interval: 90,
        };
        assert_eq!(
            marshal("/ip/firewall/filter/set", &rule).words(),
            [
                "/ip/firewall/filter/set",
                "=.id=*1",
                "=chain=input",
                "=dst-port=22",
                "=disabled=yes",
                "=interval=90",
            ]
        );
    }

    #[test]
    fn zero_values_are_suppressed_but_false_is_sent() {
        let rule = Rule {
            chain: "forward".into(),
            ..Rule::default()
        };
        assert_eq!(
            marshal("/ip/firewall/filter/add", &rule).words(),
            ["/ip/firewall/filter/add", "=chain=forward", "=disabled=no"]
        );
    }

    #[test]
    fn default_record_emits_only_path_and_booleans() {
        assert_eq!(
            marshal("/x/add", &Rule::default()).words(),
            ["/x/add", "=disabled=no"]
        );
    }
}
