use std::io::Read;

fn main() {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).unwrap();

    match arbor_core::read(&input) {
        Ok(Some(doc)) => println!("{doc}"),
        Ok(None) => {}
        Err(err) => eprintln!("ERROR: {err}"),
    }
}
