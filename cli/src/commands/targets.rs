use colored::*;
use netcheck_common::network::target::TargetCatalog;

use crate::terminal::print;

pub fn targets() {
    let catalog: TargetCatalog = TargetCatalog::builtin();

    print::header("TCP TARGETS");
    for target in catalog.targets() {
        let ports: Vec<String> = target.ports.iter().map(u16::to_string).collect();
        print::print(&format!("{} {}", target.host.cyan(), ports.join(", ").bright_black()));
    }

    print::header("URLS");
    for url in catalog.urls() {
        print::print(url);
    }

    print::print(&format!(
        "{} hosts, {} ports, {} urls",
        catalog.targets().len(),
        catalog.total_ports(),
        catalog.urls().len()
    ));
}
