// SPDX-License-Identifier: Apache-2.0
//
// Copyright 2026 wgsl-struct-fuzz contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use color_eyre::Result;
use rayon::prelude::*;
use wgsl_struct_fuzz::{Cli, MutationSession};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let data = std::fs::read(&args.input)?;

    if args.is_render_mode() {
        let source = wgsl_struct_fuzz::render(&data);
        match &args.output {
            Some(path) => std::fs::write(path, &source)?,
            None => println!("{source}"),
        }
        return Ok(());
    }

    let weights = args.weights();
    let session = {
        let mut s = MutationSession::new().with_seed(args.seed).with_max_size(args.max_size);
        if let Some(kind) = args.mutation {
            s = s.with_kind(kind);
        } else {
            s = s.with_weights(&weights);
        }
        s
    };

    if let Some(dir) = &args.dir {
        if !dir.exists() {
            std::fs::create_dir(dir)?;
        }

        let errors: Vec<_> = (0..args.samples)
            .into_par_iter()
            .filter_map(|idx| {
                let sample_session = {
                    let mut s = MutationSession::new()
                        .with_seed(args.seed.wrapping_add(idx as u64))
                        .with_max_size(args.max_size);
                    if let Some(kind) = args.mutation {
                        s = s.with_kind(kind);
                    } else {
                        s = s.with_weights(&weights);
                    }
                    s
                };
                let (_, mutated) = sample_session.run(&data);

                let mut file_path = dir.clone();
                file_path.push(format!("{idx}.wgsl-corpus"));
                std::fs::write(&file_path, &mutated).err().map(|e| (idx, e.to_string()))
            })
            .collect();

        if !errors.is_empty() {
            eprintln!("Encountered {} errors while writing samples:", errors.len());
            for (idx, error) in errors.iter().take(10) {
                eprintln!("  Sample {idx}: {error}");
            }
            if errors.len() > 10 {
                eprintln!("  ... and {} more errors", errors.len() - 10);
            }
            return Err(color_eyre::eyre::eyre!(
                "Failed to write {} out of {} samples",
                errors.len(),
                args.samples
            ));
        }

        println!("Wrote {} mutated samples to {:?}", args.samples, dir);
    } else {
        let (kind, mutated) = session.run(&data);
        match &args.output {
            Some(path) => std::fs::write(path, &mutated)?,
            None => {
                use std::io::Write;
                std::io::stdout().write_all(&mutated)?;
            }
        }
        eprintln!("Applied {kind} to {} bytes -> {} bytes", data.len(), mutated.len());
    }

    Ok(())
}
