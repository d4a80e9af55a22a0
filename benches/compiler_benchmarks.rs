// Carrot - A three-pass compiler backend for the Carrot teaching language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for the Carrot compiler.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use carrot::analyzer::analyze;
use carrot::ast::{BinaryOp, Block, Decl, Expr, FnDecl, FormalDecl, Program, Stmt, TypeNode, VarDecl};
use carrot::{CompilationContext, CompileOptions, Diagnostics, SourcePos};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

// ============================================================================
// Benchmark Inputs
// ============================================================================

const SIZES: [(&str, usize); 3] = [("small", 10), ("medium", 100), ("large", 1000)];

/// `int fN(int a, int b) { int t; t = a; while (t < b) { t++; } repeat (2) { cout << "fN"; } return t * a; }`
fn worker(index: usize) -> Decl {
    let p = SourcePos::new(index + 1, 1);
    let name = format!("f{}", index);
    let body = Block::new(
        vec![VarDecl::new(TypeNode::Int, "t", p)],
        vec![
            Stmt::assign(Expr::id("t", p), Expr::id("a", p)),
            Stmt::While {
                cond: Expr::binary(BinaryOp::Less, Expr::id("t", p), Expr::id("b", p)),
                body: Block::of(vec![Stmt::PostInc(Expr::id("t", p))]),
            },
            Stmt::Repeat {
                count: Expr::int(2, p),
                body: Block::of(vec![Stmt::Write(Expr::string(name.clone(), p))]),
            },
            Stmt::ret(
                Some(Expr::binary(BinaryOp::Mul, Expr::id("t", p), Expr::id("a", p))),
                p,
            ),
        ],
    );
    Decl::Fn(FnDecl::new(
        TypeNode::Int,
        name,
        p,
        vec![
            FormalDecl::new(TypeNode::Int, "a", p),
            FormalDecl::new(TypeNode::Int, "b", p),
        ],
        body,
    ))
}

/// `functions` workers and a `main` that calls each of them.
fn synthetic_program(functions: usize) -> Program {
    let p = SourcePos::NONE;
    let mut decls: Vec<Decl> = (0..functions).map(worker).collect();
    let calls = (0..functions)
        .map(|i| {
            Stmt::Write(Expr::call(
                format!("f{}", i),
                p,
                vec![Expr::int(i as i32, p), Expr::int(10, p)],
            ))
        })
        .collect();
    decls.push(Decl::Fn(FnDecl::new(TypeNode::Void, "main", p, vec![], Block::of(calls))));
    Program::with_decls(decls)
}

fn analyzed(program: &Program) -> (Program, CompilationContext) {
    let mut program = program.clone();
    let mut ctx = CompilationContext::new(CompileOptions::default());
    let mut diagnostics = Diagnostics::new();
    analyze(&mut program, &mut ctx, &mut diagnostics);
    assert!(diagnostics.is_empty(), "{}", diagnostics);
    (program, ctx)
}

// ============================================================================
// Analyzer Benchmarks
// ============================================================================

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");

    for (label, functions) in SIZES {
        let program = synthetic_program(functions);
        group.throughput(Throughput::Elements(program.decls.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze", label), &program, |b, program| {
            b.iter_batched(
                || program.clone(),
                |mut program| {
                    let mut ctx = CompilationContext::default();
                    let mut diagnostics = Diagnostics::new();
                    analyze(black_box(&mut program), &mut ctx, &mut diagnostics);
                    diagnostics
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Code Generation Benchmarks
// ============================================================================

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");

    for (label, functions) in SIZES {
        // Analysis links the tree in place, so it runs once up front.
        let (program, ctx) = analyzed(&synthetic_program(functions));
        group.throughput(Throughput::Elements(program.decls.len() as u64));
        group.bench_with_input(BenchmarkId::new("generate", label), &program, |b, program| {
            b.iter_batched(
                || ctx.clone(),
                |ctx| carrot::codegen::generate(black_box(program), ctx),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// End-to-End Compilation Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (label, functions) in SIZES {
        let program = synthetic_program(functions);
        group.throughput(Throughput::Elements(program.decls.len() as u64));
        group.bench_with_input(BenchmarkId::new("full", label), &program, |b, program| {
            b.iter_batched(
                || program.clone(),
                |mut program| carrot::compile(black_box(&mut program), CompileOptions::default()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Micro-Benchmarks
// ============================================================================

fn bench_micro(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro");
    let p = SourcePos::NONE;

    // Minimal program
    let minimal = synthetic_program(0);
    group.bench_function("empty_main", |b| {
        b.iter_batched(
            || minimal.clone(),
            |mut program| carrot::compile(black_box(&mut program), CompileOptions::default()),
            BatchSize::SmallInput,
        )
    });

    // Deeply right-nested expression
    let mut expr = Expr::int(0, p);
    for i in 1..200 {
        expr = Expr::binary(BinaryOp::Add, Expr::int(i, p), expr);
    }
    let deep = Program::with_decls(vec![Decl::Fn(FnDecl::new(
        TypeNode::Void,
        "main",
        p,
        vec![],
        Block::of(vec![Stmt::Write(expr)]),
    ))]);
    group.bench_function("deep_expression", |b| {
        b.iter_batched(
            || deep.clone(),
            |mut program| carrot::compile(black_box(&mut program), CompileOptions::default()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_analyzer,
    bench_codegen,
    bench_compile,
    bench_micro
);
criterion_main!(benches);
