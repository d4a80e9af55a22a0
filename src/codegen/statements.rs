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

//! Statement code generation.
//!
//! A statement leaves the operand stack exactly as it found it, so
//! expression statements pop whatever their expression pushed.

use super::control_flow::ControlFlowEmitter;
use super::expressions::ExpressionEmitter;
use super::mips::{indexed, opcodes, registers, syscalls};
use super::type_inference::TypeInference;
use super::CodeGenerator;
use super::EmitHelpers;
use crate::ast::{Block, Expr, Stmt};
use crate::error::CodegenError;

/// Extension trait for statement code generation.
pub trait StatementEmitter {
    /// Generate every statement of a block in order.
    fn generate_block(&mut self, block: &Block) -> Result<(), CodegenError>;

    /// Generate one statement.
    fn generate_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError>;

    /// Generate `loc++`, or `loc--` when `increment` is false.
    fn generate_step(&mut self, loc: &Expr, increment: bool) -> Result<(), CodegenError>;

    /// Generate `cin >> loc`.
    fn generate_read(&mut self, loc: &Expr) -> Result<(), CodegenError>;

    /// Generate `cout << expr`.
    fn generate_write(&mut self, expr: &Expr) -> Result<(), CodegenError>;

    /// Generate `return`, jumping to the current function's exit label.
    fn generate_return(&mut self, value: Option<&Expr>) -> Result<(), CodegenError>;
}

impl StatementEmitter for CodeGenerator {
    fn generate_block(&mut self, block: &Block) -> Result<(), CodegenError> {
        for stmt in &block.stmts {
            self.generate_stmt(stmt)?;
        }
        Ok(())
    }

    fn generate_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        let depth = self.stack_depth;

        match stmt {
            Stmt::Assign(assign) => {
                self.generate_assign(assign)?;
                self.pop(registers::T0);
            }
            Stmt::PostInc(loc) => self.generate_step(loc, true)?,
            Stmt::PostDec(loc) => self.generate_step(loc, false)?,
            Stmt::Read(loc) => self.generate_read(loc)?,
            Stmt::Write(expr) => self.generate_write(expr)?,
            Stmt::If { cond, body } => self.generate_if(cond, body)?,
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => self.generate_if_else(cond, then_body, else_body)?,
            Stmt::While { cond, body } => self.generate_while(cond, body)?,
            Stmt::Repeat { count, body } => self.generate_repeat(count, body)?,
            Stmt::Call(call) => {
                self.emit_comment("CALL STMT");
                self.generate_call(call)?;
                if self.returns_value(call) {
                    self.pop(registers::T0);
                }
            }
            Stmt::Return { value, .. } => self.generate_return(value.as_ref())?,
        }

        debug_assert_eq!(self.stack_depth, depth, "statement left the operand stack unbalanced");
        Ok(())
    }

    fn generate_step(&mut self, loc: &Expr, increment: bool) -> Result<(), CodegenError> {
        let (opcode, comment) = if increment {
            (opcodes::ADD, "POSTINC")
        } else {
            (opcodes::SUB, "POSTDEC")
        };

        self.emit_comment(comment);
        self.generate_address(loc)?;
        self.pop(registers::T1);
        self.generate_expr(loc)?;
        self.pop(registers::T0);
        self.emit_op(opcode, &[registers::T0, registers::T0, "1"]);
        self.emit_op(opcodes::SW, &[registers::T0, &indexed(0, registers::T1)]);
        Ok(())
    }

    fn generate_read(&mut self, loc: &Expr) -> Result<(), CodegenError> {
        self.emit_comment("READ");
        self.emit_op(opcodes::LI, &[registers::V0, &syscalls::READ_INT.to_string()]);
        self.emit_op(opcodes::SYSCALL, &[]);
        self.generate_address(loc)?;
        self.pop(registers::T0);
        self.emit_op(opcodes::SW, &[registers::V0, &indexed(0, registers::T0)]);
        Ok(())
    }

    fn generate_write(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        let syscall = if self.expr_type(expr).is_string() {
            syscalls::PRINT_STRING
        } else {
            syscalls::PRINT_INT
        };

        self.emit_comment("WRITE");
        self.generate_expr(expr)?;
        self.pop(registers::A0);
        self.emit_op(opcodes::LI, &[registers::V0, &syscall.to_string()]);
        self.emit_op(opcodes::SYSCALL, &[]);
        Ok(())
    }

    fn generate_return(&mut self, value: Option<&Expr>) -> Result<(), CodegenError> {
        self.emit_comment("RETURN");
        if let Some(value) = value {
            self.generate_expr(value)?;
            self.pop(registers::V0);
        }
        let exit = self.current_exit.clone();
        self.emit_branch(&exit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Decl, FnDecl, Program, TypeNode, VarDecl};
    use crate::codegen::tests::{generate_with, quiet};
    use crate::codegen::Assembly;
    use crate::error::SourcePos;

    fn p() -> SourcePos {
        SourcePos::NONE
    }

    /// `void main() { int n; <stmts> }` plus the given extra declarations.
    fn compile_main(extra: Vec<Decl>, stmts: Vec<Stmt>) -> Assembly {
        let mut decls = extra;
        decls.push(Decl::Fn(FnDecl::new(
            TypeNode::Void,
            "main",
            p(),
            vec![],
            Block::new(vec![VarDecl::new(TypeNode::Int, "n", p())], stmts),
        )));
        generate_with(Program::with_decls(decls), quiet())
    }

    fn body(asm: &Assembly) -> Vec<String> {
        // From after main's locals reservation up to its exit label.
        let lines: Vec<String> = asm.instructions.iter().map(|i| i.to_string()).collect();
        let entry = lines.iter().position(|l| l == "main:").unwrap();
        let set_fp = entry + lines[entry..].iter().position(|l| l == "    addu   $fp, $sp, 8").unwrap();
        let start = set_fp + 1;
        let end = lines.iter().position(|l| l == "main_Exit:").unwrap();
        lines[start + 1..end].to_vec()
    }

    #[test]
    fn test_assign_statement() {
        let asm = compile_main(vec![], vec![Stmt::assign(Expr::id("n", p()), Expr::int(3, p()))]);
        assert_eq!(
            body(&asm),
            vec![
                "    li     $t0, 3",
                "    sw     $t0, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    la     $t0, -8($fp)",
                "    sw     $t0, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    lw     $t0, 4($sp)",
                "    addu   $sp, $sp, 4",
                "    lw     $t1, 4($sp)",
                "    addu   $sp, $sp, 4",
                "    sw     $t1, 0($t0)",
                "    sw     $t1, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    lw     $t0, 4($sp)",
                "    addu   $sp, $sp, 4",
            ]
        );
    }

    #[test]
    fn test_post_increment_and_decrement() {
        let asm = compile_main(
            vec![],
            vec![Stmt::PostInc(Expr::id("n", p())), Stmt::PostDec(Expr::id("n", p()))],
        );
        let body = body(&asm);
        assert!(body.contains(&"    add    $t0, $t0, 1".to_string()));
        assert!(body.contains(&"    sub    $t0, $t0, 1".to_string()));
        assert_eq!(body.iter().filter(|l| *l == "    sw     $t0, 0($t1)").count(), 2);
    }

    #[test]
    fn test_read_statement() {
        let asm = compile_main(vec![], vec![Stmt::Read(Expr::id("n", p()))]);
        let body = body(&asm);
        assert_eq!(body[0], "    li     $v0, 5");
        assert_eq!(body[1], "    syscall");
        assert_eq!(body.last().map(String::as_str), Some("    sw     $v0, 0($t0)"));
    }

    #[test]
    fn test_write_selects_syscall_by_type() {
        let asm = compile_main(
            vec![],
            vec![
                Stmt::Write(Expr::id("n", p())),
                Stmt::Write(Expr::bool(true, p())),
                Stmt::Write(Expr::string("done", p())),
            ],
        );
        let selectors: Vec<String> = body(&asm)
            .into_iter()
            .filter(|l| l.starts_with("    li     $v0"))
            .collect();
        assert_eq!(
            selectors,
            vec!["    li     $v0, 1", "    li     $v0, 1", "    li     $v0, 4"]
        );
    }

    #[test]
    fn test_call_statement_discards_result() {
        let answer = Decl::Fn(FnDecl::new(
            TypeNode::Int,
            "answer",
            p(),
            vec![],
            Block::of(vec![Stmt::ret(Some(Expr::int(42, p())), p())]),
        ));
        let asm = compile_main(vec![answer], vec![Stmt::call(Expr::call("answer", p(), vec![])).unwrap()]);
        let body = body(&asm);
        assert_eq!(
            body,
            vec![
                "    jal    _answer",
                "    sw     $v0, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    lw     $t0, 4($sp)",
                "    addu   $sp, $sp, 4",
            ]
        );
    }

    #[test]
    fn test_return_branches_to_exit() {
        let asm = compile_main(vec![], vec![Stmt::ret(None, p())]);
        assert_eq!(body(&asm), vec!["    b      main_Exit"]);
    }
}
