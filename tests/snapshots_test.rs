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

//! Snapshot tests for the Carrot compiler.
//!
//! These tests use the `insta` crate to pin the complete assembly produced
//! for small programs, so any change to the emitted code shows up as a diff.

mod common;

use carrot::ast::{BinaryOp, Block, Expr, Program, Stmt, TypeNode};
use carrot::CompileOptions;
use common::*;

// ============================================================================
// Code Generation Snapshots
// ============================================================================

#[test]
fn test_codegen_snapshot_empty_main_commented() {
    let mut program = Program::with_decls(vec![main_fn(vec![], vec![])]);
    let asm = carrot::compile(&mut program, CompileOptions::default()).unwrap();
    insta::assert_snapshot!(asm.to_string(), @r#"
        .text
        .globl main
        # FUNCTION ENTRY
    main:
        sw     $ra, 0($sp)
        subu   $sp, $sp, 4
        sw     $fp, 0($sp)
        subu   $sp, $sp, 4
        addu   $fp, $sp, 8  # set the FP
        # FUNCTION EXIT
    main_Exit:
        lw     $ra, 0($fp)  # load return address
        move   $t0, $fp  # save control link
        lw     $fp, -4($fp)  # restore FP
        move   $sp, $t0  # restore SP
        li     $v0, 10  # load exit code for syscall
        syscall  # only for main exit
    "#);
}

/// `int x; void main() { int y; y = x + 1; cout << y; }`
#[test]
fn test_codegen_snapshot_global_and_local() {
    let program = Program::with_decls(vec![
        global(int_var("x", at(1, 5))),
        main_fn(
            vec![int_var("y", at(2, 9))],
            vec![
                Stmt::assign(
                    Expr::id("y", at(3, 5)),
                    Expr::binary(BinaryOp::Add, Expr::id("x", at(3, 9)), Expr::int(1, at(3, 13))),
                ),
                write(Expr::id("y", at(4, 13))),
            ],
        ),
    ]);
    insta::assert_snapshot!(assemble(program), @r#"
        .data
        .align 2
    _x: .space 4
        .text
        .globl main
    main:
        sw     $ra, 0($sp)
        subu   $sp, $sp, 4
        sw     $fp, 0($sp)
        subu   $sp, $sp, 4
        addu   $fp, $sp, 8
        subu   $sp, $sp, 4
        lw     $t0, _x
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        li     $t0, 1
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $t1, 4($sp)
        addu   $sp, $sp, 4
        lw     $t0, 4($sp)
        addu   $sp, $sp, 4
        addu   $t0, $t0, $t1
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        la     $t0, -8($fp)
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $t0, 4($sp)
        addu   $sp, $sp, 4
        lw     $t1, 4($sp)
        addu   $sp, $sp, 4
        sw     $t1, 0($t0)
        sw     $t1, 0($sp)
        subu   $sp, $sp, 4
        lw     $t0, 4($sp)
        addu   $sp, $sp, 4
        lw     $t0, -8($fp)
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $a0, 4($sp)
        addu   $sp, $sp, 4
        li     $v0, 1
        syscall
    main_Exit:
        lw     $ra, 0($fp)
        move   $t0, $fp
        lw     $fp, -4($fp)
        move   $sp, $t0
        li     $v0, 10
        syscall
    "#);
}

/// `int twice(int n) { return n + n; }  void main() { cout << twice(21); cout << "hi"; }`
#[test]
fn test_codegen_snapshot_call_and_string() {
    let twice = function(
        TypeNode::Int,
        "twice",
        at(1, 5),
        vec![int_formal("n", at(1, 15))],
        vec![],
        vec![Stmt::ret(
            Some(Expr::binary(BinaryOp::Add, Expr::id("n", at(1, 27)), Expr::id("n", at(1, 31)))),
            at(1, 20),
        )],
    );
    let program = Program::with_decls(vec![
        twice,
        main_fn(
            vec![],
            vec![
                write(Expr::call("twice", at(2, 21), vec![Expr::int(21, at(2, 27))])),
                write(Expr::string("hi", at(2, 43))),
            ],
        ),
    ]);
    insta::assert_snapshot!(assemble(program), @r#"
        .text
    _twice:
        sw     $ra, 0($sp)
        subu   $sp, $sp, 4
        sw     $fp, 0($sp)
        subu   $sp, $sp, 4
        addu   $fp, $sp, 12
        lw     $t0, 0($fp)
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $t0, 0($fp)
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $t1, 4($sp)
        addu   $sp, $sp, 4
        lw     $t0, 4($sp)
        addu   $sp, $sp, 4
        addu   $t0, $t0, $t1
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $v0, 4($sp)
        addu   $sp, $sp, 4
        b      .L0
    .L0:
        lw     $ra, -4($fp)
        move   $t0, $fp
        lw     $fp, -8($fp)
        move   $sp, $t0
        jr     $ra
        .text
        .globl main
    main:
        sw     $ra, 0($sp)
        subu   $sp, $sp, 4
        sw     $fp, 0($sp)
        subu   $sp, $sp, 4
        addu   $fp, $sp, 8
        li     $t0, 21
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        jal    _twice
        sw     $v0, 0($sp)
        subu   $sp, $sp, 4
        lw     $a0, 4($sp)
        addu   $sp, $sp, 4
        li     $v0, 1
        syscall
        .data
    .L1: .asciiz "hi"
        .text
        la     $t0, .L1
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $a0, 4($sp)
        addu   $sp, $sp, 4
        li     $v0, 4
        syscall
    main_Exit:
        lw     $ra, 0($fp)
        move   $t0, $fp
        lw     $fp, -4($fp)
        move   $sp, $t0
        li     $v0, 10
        syscall
    "#);
}

/// `void main() { if (true) { cout << "yes"; } else { cout << "yes"; } }`
#[test]
fn test_codegen_snapshot_if_else_shares_string() {
    let yes = || Block::of(vec![write(Expr::string("yes", nowhere()))]);
    let program = Program::with_decls(vec![main_fn(
        vec![],
        vec![Stmt::IfElse {
            cond: Expr::bool(true, at(2, 9)),
            then_body: yes(),
            else_body: yes(),
        }],
    )]);
    insta::assert_snapshot!(assemble(program), @r#"
        .text
        .globl main
    main:
        sw     $ra, 0($sp)
        subu   $sp, $sp, 4
        sw     $fp, 0($sp)
        subu   $sp, $sp, 4
        addu   $fp, $sp, 8
        li     $t0, 1
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $t0, 4($sp)
        addu   $sp, $sp, 4
        beq    $t0, 0, .L0
        .data
    .L2: .asciiz "yes"
        .text
        la     $t0, .L2
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $a0, 4($sp)
        addu   $sp, $sp, 4
        li     $v0, 4
        syscall
        b      .L1
    .L0:
        la     $t0, .L2
        sw     $t0, 0($sp)
        subu   $sp, $sp, 4
        lw     $a0, 4($sp)
        addu   $sp, $sp, 4
        li     $v0, 4
        syscall
    .L1:
    main_Exit:
        lw     $ra, 0($fp)
        move   $t0, $fp
        lw     $fp, -4($fp)
        move   $sp, $t0
        li     $v0, 10
        syscall
    "#);
}

// ============================================================================
// Diagnostic Snapshots
// ============================================================================

#[test]
fn test_diagnostics_snapshot() {
    // int x; bool x; void main() { cout << y; while (1) { x++; } return 3; }
    let mut program = Program::with_decls(vec![
        global(int_var("x", at(1, 5))),
        global(bool_var("x", at(2, 6))),
        main_fn(
            vec![],
            vec![
                write(Expr::id("y", at(3, 13))),
                Stmt::While {
                    cond: Expr::int(1, at(4, 12)),
                    body: Block::of(vec![Stmt::PostInc(Expr::id("x", at(5, 9)))]),
                },
                Stmt::ret(Some(Expr::int(3, at(7, 12))), at(7, 5)),
            ],
        ),
    ]);
    let err = carrot::compile(&mut program, CompileOptions::default()).unwrap_err();
    let diagnostics = err.diagnostics().expect("semantic failure");
    insta::assert_snapshot!(diagnostics.to_string(), @r"
    2:6 ***ERROR*** Multiply declared identifier
    3:13 ***ERROR*** Undeclared identifier
    4:12 ***ERROR*** Non-bool expression used as a while condition
    7:12 ***ERROR*** Return with a value in a void function
    ");
}
