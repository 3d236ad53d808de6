// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use std::process;

fn main() {
    if package_updates::run().is_err() {
        process::exit(1);
    }
}
