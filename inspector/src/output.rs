use inspector_core::{CollectionManager, LoadReport};
use parameter::flatten;

pub fn print_info(message: &str) {
    println!("[Inspector][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[Inspector][ERROR]: {message}");
}

pub fn print_collection(manager: &CollectionManager) {
    if manager.is_empty() {
        print_info("Collection is empty");
        return;
    }
    print_info(&format!("{} ({} items):", manager.title(), manager.len()));
    for (row, item) in manager.items().enumerate() {
        let marker = if manager.current_index() == Some(row) {
            "*"
        } else {
            " "
        };
        let checked = if item.is_checked() { "[x]" } else { "[ ]" };
        println!("{marker} {checked} {} ({})", item.name(), item.type_name());
        for parameter in flatten(item.parameters()) {
            println!("\t{}: {}", parameter.name(), parameter.value_string());
        }
    }
}

pub fn print_report(report: &LoadReport) {
    print_info(&format!("Loaded {} item(s)", report.loaded));
    for skipped in &report.skipped {
        let type_name = skipped.type_name.as_deref().unwrap_or("?");
        print_error(&format!(
            "skipped record #{} ({type_name}): {}",
            skipped.index, skipped.reason
        ));
    }
}
