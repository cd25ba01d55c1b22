//! Declaration walker for PHP syntax trees
//!
//! Walks the statements that can hold a class declaration: the program's
//! top level, namespace bodies, plain blocks and conditional bodies such as
//! `if (!class_exists('Foo')) { class Foo {} }`. Function and method bodies
//! are not entered.

use mago_syntax::ast::*;

/// Trait for visiting class declarations in a PHP program
pub trait Visitor<'a> {
    /// Called for each class declaration reached by the walk
    fn visit_class(&mut self, class: &Class<'a>, source: &str);

    /// Visit a program (entry point)
    fn visit_program(&mut self, program: &Program<'a>, source: &str) {
        for stmt in program.statements.iter() {
            self.traverse_statement(stmt, source);
        }
    }

    /// Traverse a statement and the declaration containers below it
    fn traverse_statement(&mut self, stmt: &Statement<'a>, source: &str) {
        match stmt {
            Statement::Class(class) => {
                self.visit_class(class, source);
            }
            Statement::Namespace(ns) => match &ns.body {
                NamespaceBody::Implicit(body) => {
                    for inner in body.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
                NamespaceBody::BraceDelimited(body) => {
                    for inner in body.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
            },
            Statement::Block(block) => {
                for inner in block.statements.iter() {
                    self.traverse_statement(inner, source);
                }
            }
            Statement::If(if_stmt) => {
                self.traverse_if_body(&if_stmt.body, source);
            }
            _ => {}
        }
    }

    /// Traverse an if body
    fn traverse_if_body(&mut self, body: &IfBody<'a>, source: &str) {
        match body {
            IfBody::Statement(stmt_body) => {
                self.traverse_statement(stmt_body.statement, source);
                for else_if in stmt_body.else_if_clauses.iter() {
                    self.traverse_statement(else_if.statement, source);
                }
                if let Some(else_clause) = &stmt_body.else_clause {
                    self.traverse_statement(else_clause.statement, source);
                }
            }
            IfBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.traverse_statement(inner, source);
                }
                for else_if in block.else_if_clauses.iter() {
                    for inner in else_if.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
                if let Some(else_clause) = &block.else_clause {
                    for inner in else_clause.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
            }
        }
    }
}

/// Helper function to run a visitor on a program
pub fn visit<'a, V: Visitor<'a>>(visitor: &mut V, program: &Program<'a>, source: &str) {
    visitor.visit_program(program, source);
}
