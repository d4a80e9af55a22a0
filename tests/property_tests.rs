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

//! Property-based tests for the Carrot compiler.
//!
//! These tests verify invariants that should hold for whole families of
//! programs, using proptest to generate their shapes.

mod common;

use carrot::ast::{BinaryOp, Block, Decl, Expr, Program, Stmt, TypeNode, UnaryOp};
use common::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// `void f(int p0, ..., int pN) { int l0; ... int lM; }` plus `main`.
fn function_with_frame(params: usize, locals: usize) -> Program {
    let formals = (0..params)
        .map(|i| int_formal(&format!("p{}", i), at(1, 10 + i)))
        .collect();
    let decls = (0..locals)
        .map(|i| int_var(&format!("l{}", i), at(2 + i, 9)))
        .collect();
    Program::with_decls(vec![
        function(TypeNode::Void, "f", at(1, 6), formals, decls, vec![]),
        main_fn(vec![], vec![]),
    ])
}

/// A function whose body nests `depth` if/while pairs.
fn nested_control_flow(name: &str, depth: usize) -> Decl {
    let mut body = Block::of(vec![write(Expr::int(0, nowhere()))]);
    for _ in 0..depth {
        body = Block::of(vec![Stmt::If {
            cond: Expr::bool(true, nowhere()),
            body: Block::of(vec![Stmt::While {
                cond: Expr::bool(false, nowhere()),
                body,
            }]),
        }]);
    }
    function(TypeNode::Void, name, nowhere(), vec![], body.decls, body.stmts)
}

// ============================================================================
// Name Resolution Properties
// ============================================================================

proptest! {
    /// Property: formals count down from 0 and locals continue two words
    /// below the last formal.
    #[test]
    fn prop_frame_offsets(params in 0usize..6, locals in 0usize..8) {
        let mut program = function_with_frame(params, locals);
        let (ctx, _, diagnostics) = analyze_program(&mut program);
        prop_assert!(diagnostics.is_empty());

        let Decl::Fn(f) = &program.decls[0] else { unreachable!() };
        for (i, formal) in f.formals.iter().enumerate() {
            let symbol = ctx.symbol(formal.id.symbol().unwrap());
            prop_assert_eq!(symbol.offset, -4 * i as i32);
        }
        for (j, local) in f.body.decls.iter().enumerate() {
            let symbol = ctx.symbol(local.id.symbol().unwrap());
            prop_assert_eq!(symbol.offset, -(4 * params as i32 + 8 + 4 * j as i32));
        }

        let info = ctx.symbol(f.id.symbol().unwrap()).function_info().cloned().unwrap();
        prop_assert_eq!(info.params_frame_size, 4 * params as i32);
        prop_assert_eq!(info.locals_frame_size, 4 * locals as i32);
    }

    /// Property: a bad operand buried under any number of arithmetic
    /// operators is reported exactly once.
    #[test]
    fn prop_error_operand_reported_once(
        ops in prop::collection::vec(
            prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div]),
            1..12,
        ),
        negate in any::<bool>(),
    ) {
        let mut expr = Expr::binary(ops[0], Expr::int(1, at(2, 1)), Expr::bool(true, at(2, 5)));
        for (i, op) in ops.iter().enumerate().skip(1) {
            expr = Expr::binary(*op, expr, Expr::int(i as i32, at(2, 10 + i)));
            if negate {
                expr = Expr::unary(UnaryOp::Neg, expr);
            }
        }
        let program = Program::with_decls(vec![main_fn(vec![], vec![write(expr)])]);
        prop_assert_eq!(diagnose(program), vec![(carrot::ErrorCode::ArithmeticOperand, at(2, 5))]);
    }
}

// ============================================================================
// Code Generation Properties
// ============================================================================

proptest! {
    /// Property: every label in the generated assembly is defined once.
    #[test]
    fn prop_labels_are_unique(depths in prop::collection::vec(0usize..4, 0..6)) {
        let mut decls: Vec<Decl> = depths
            .iter()
            .enumerate()
            .map(|(i, depth)| nested_control_flow(&format!("f{}", i), *depth))
            .collect();
        decls.push(main_fn(vec![], vec![]));
        let mut program = Program::with_decls(decls);

        let asm = carrot::compile(&mut program, quiet()).unwrap();
        let labels: Vec<&str> = asm.labels().collect();
        let distinct: HashSet<&str> = labels.iter().copied().collect();
        prop_assert_eq!(labels.len(), distinct.len());

        let expected = depths.iter().map(|depth| 2 + 3 * depth).sum::<usize>() + 2;
        prop_assert_eq!(labels.len(), expected);
    }

    /// Property: each distinct string literal gets exactly one `.asciiz`.
    #[test]
    fn prop_strings_are_pooled(texts in prop::collection::vec("[a-c ]{0,3}", 0..12)) {
        let stmts = texts
            .iter()
            .map(|text| write(Expr::string(text.as_str(), nowhere())))
            .collect();
        let mut program = Program::with_decls(vec![main_fn(vec![], stmts)]);
        let asm = carrot::compile(&mut program, quiet()).unwrap();

        let distinct: HashSet<&str> = texts.iter().map(String::as_str).collect();
        prop_assert_eq!(asm.ops(".asciiz").count(), distinct.len());
        prop_assert_eq!(asm.strings.len(), distinct.len());
        prop_assert_eq!(asm.ops("la").count(), texts.len());
    }

    /// Property: a left-leaning sum needs two operand slots, a right-leaning
    /// sum needs one per term.
    #[test]
    fn prop_stack_depth_follows_tree_shape(terms in 2usize..24) {
        let int = |value: usize| Expr::int(value as i32, nowhere());

        let mut left = int(0);
        let mut right = int(terms - 1);
        for i in 1..terms {
            left = Expr::binary(BinaryOp::Add, left, int(i));
            right = Expr::binary(BinaryOp::Add, int(terms - 1 - i), right);
        }

        let mut program = Program::with_decls(vec![main_fn(vec![], vec![write(left)])]);
        let asm = carrot::compile(&mut program, quiet()).unwrap();
        prop_assert_eq!(asm.max_stack_depth, 2);

        let mut program = Program::with_decls(vec![main_fn(vec![], vec![write(right)])]);
        let asm = carrot::compile(&mut program, quiet()).unwrap();
        prop_assert_eq!(asm.max_stack_depth, terms);
    }
}
