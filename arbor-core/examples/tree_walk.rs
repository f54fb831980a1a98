//! Example: Read both notations and navigate the resulting trees.
//!
//! Run with: cargo run --example tree_walk

use arbor_core::Node;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let markup = "<article id=\"intro\">\n\
                  <heading>Welcome</heading>\n\
                  <p>Structure and prose, one tree.</p>\n\
                  </article>";

    let object = "{\n\
                  \"article\": {\n\
                  \"@id\": \"intro\",\n\
                  \"#article\": {\n\
                  \"heading\": {\"#heading\": \"Welcome\"},\n\
                  \"p\": {\"#p\": \"Structure and prose, one tree.\"}\n\
                  }\n\
                  }\n\
                  }";

    for (label, input) in [("markup", markup), ("object", object)] {
        let doc = arbor_core::read(input)
            .expect("well-formed input")
            .expect("recognized format");

        println!("=== {label} tree ===\n");
        print_node(doc.root(), 0);

        println!("\n=== {label} listing ==={doc}\n");
    }
}

fn print_node(node: Node<'_, '_>, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.name() {
        Some(name) => {
            print!("{indent}{name}");
            if let Some(value) = node.value() {
                print!(" = {value:?}");
            }
            println!();
            for attr in node.attributes() {
                println!("{indent}  :{} = {:?}", attr.name, attr.value);
            }
        }
        None => println!("{indent}(root)"),
    }
    for child in node.children() {
        print_node(child, depth + 1);
    }
}
