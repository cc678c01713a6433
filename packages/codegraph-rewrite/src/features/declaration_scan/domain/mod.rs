mod implicit_declaration;

pub use implicit_declaration::ImplicitDeclaration;
