use super::proto::kind;
use super::proto::Variable;
use itertools::Itertools;

/// Render a delve variable into a single line with shortened type names.
pub fn render_single_line(var: &Variable) -> String {
    let mut out = String::new();
    write_value(&mut out, var, true);
    out
}

/// Strip package paths from type names: `map[string]*github.com/a/b.T` -> `map[string]*b.T`.
pub fn short_type(r#type: &str) -> String {
    let mut result = String::with_capacity(r#type.len());
    let mut segment_start = 0;
    for c in r#type.chars() {
        if c == '/' {
            result.truncate(segment_start);
        } else if is_type_delimiter(c) {
            result.push(c);
            segment_start = result.len();
        } else {
            result.push(c);
        }
    }
    result
}

fn is_type_delimiter(c: char) -> bool {
    matches!(c, '[' | ']' | '*' | '(' | ')' | ',' | ' ' | '{' | '}')
}

fn write_value(out: &mut String, var: &Variable, top: bool) {
    if !var.unreadable.is_empty() {
        out.push_str(&format!("(unreadable {})", var.unreadable));
        return;
    }

    let typ = short_type(&var.r#type);
    match var.kind {
        kind::INVALID => {
            if !var.value.is_empty() {
                out.push_str(&var.value);
            } else if !var.r#type.is_empty() {
                out.push_str("nil");
            }
        }
        kind::STRING => {
            out.push_str(&format!("{:?}", var.value));
            let more = var.len - var.value.chars().count() as i64;
            if more > 0 {
                out.push_str(&format!("...+{more} more"));
            }
        }
        kind::PTR | kind::UNSAFE_POINTER => match var.children.first() {
            None => out.push_str("nil"),
            Some(pointee) if pointee.only_addr && pointee.addr != 0 => {
                out.push_str(&format!("({typ})({:#x})", pointee.addr));
            }
            Some(pointee) if pointee.only_addr => out.push_str("nil"),
            Some(pointee) => {
                out.push('*');
                write_value(out, pointee, false);
            }
        },
        kind::SLICE => {
            if top {
                out.push_str(&format!("{typ} len: {}, cap: {}, ", var.len, var.cap));
            }
            write_list(out, var, |out, child| write_value(out, child, false));
        }
        kind::ARRAY => {
            if top {
                out.push_str(&format!("{typ} "));
            }
            write_list(out, var, |out, child| write_value(out, child, false));
        }
        kind::MAP => {
            if top {
                out.push_str(&format!("{typ} "));
            }
            out.push('[');
            let entries = var
                .children
                .chunks(2)
                .filter(|kv| kv.len() == 2)
                .map(|kv| {
                    let mut entry = String::new();
                    write_value(&mut entry, &kv[0], false);
                    entry.push_str(": ");
                    write_value(&mut entry, &kv[1], false);
                    entry
                })
                .join(", ");
            out.push_str(&entries);
            let more = var.len - (var.children.len() / 2) as i64;
            if more > 0 {
                out.push_str(&format!(", ...+{more} more"));
            }
            out.push(']');
        }
        kind::STRUCT => {
            if var.len > 0 && var.children.is_empty() {
                out.push_str(&format!("(*{typ})({:#x})", var.addr));
                return;
            }
            if top {
                out.push_str(&format!("{typ} "));
            }
            let fields = var
                .children
                .iter()
                .map(|field| {
                    let mut entry = format!("{}: ", field.name);
                    write_value(&mut entry, field, false);
                    entry
                })
                .join(", ");
            out.push_str(&format!("{{{fields}}}"));
        }
        kind::INTERFACE => match var.children.first() {
            None => out.push_str("nil"),
            Some(data) if data.kind == kind::INVALID && data.r#type.is_empty() => {
                out.push_str("nil")
            }
            Some(data) => {
                out.push_str(&format!("{typ}({}) ", short_type(&data.r#type)));
                write_value(out, data, false);
            }
        },
        kind::CHAN => {
            if var.children.is_empty() {
                out.push_str("nil");
            } else {
                out.push_str(&format!("{typ} {}/{}", var.len, var.cap));
            }
        }
        kind::FUNC => {
            if var.value.is_empty() {
                out.push_str("nil");
            } else {
                out.push_str(&var.value);
            }
        }
        _ => {
            if var.value.is_empty() {
                out.push_str(&format!("({typ})"));
            } else {
                out.push_str(&var.value);
            }
        }
    }
}

fn write_list(out: &mut String, var: &Variable, write_child: impl Fn(&mut String, &Variable)) {
    out.push('[');
    for (i, child) in var.children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_child(out, child);
    }
    let more = var.len - var.children.len() as i64;
    if more > 0 {
        if !var.children.is_empty() {
            out.push(',');
        }
        out.push_str(&format!("...+{more} more"));
    }
    out.push(']');
}
